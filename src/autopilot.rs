//! Greedy computer player
//!
//! Each tick the autopilot looks one cell ahead in every direction it is
//! allowed to turn. Moves that crash are discarded; the rest are ranked by how
//! much open space remains reachable from the new head, then by distance to
//! the food, then by whether they keep the current heading. The space check
//! keeps the snake out of most dead ends without any real search.

use std::collections::{HashSet, VecDeque};

use crate::game::{Action, Direction, GameState, Position};

#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }

    pub fn choose(&self, state: &GameState) -> Action {
        let snake = &state.snake;
        let head = snake.head();

        let best = Direction::ALL
            .into_iter()
            .filter(|dir| !snake.direction.is_opposite(*dir))
            .filter_map(|dir| {
                let next = head.moved_in_direction(dir);
                let growing = state.food == Some(next);
                if !state.is_in_bounds(next) || snake.blocks(next, growing) {
                    return None;
                }
                let space = reachable_cells(state, next, growing);
                let distance = state
                    .food
                    .map_or(0, |food| next.manhattan_distance(food));
                let straight = dir == snake.direction;
                Some((dir, space, distance, straight))
            })
            .max_by(|a, b| {
                a.1.cmp(&b.1)
                    .then(b.2.cmp(&a.2))
                    .then(a.3.cmp(&b.3))
            });

        match best {
            Some((dir, ..)) => Action::Steer(dir),
            None => Action::Continue,
        }
    }
}

/// Number of free cells reachable from `start` once the head sits there.
///
/// The old tail counts as free unless the snake is growing this tick.
fn reachable_cells(state: &GameState, start: Position, growing: bool) -> usize {
    let body = &state.snake.body;
    let keep = if growing { body.len() } else { body.len() - 1 };
    let blocked: HashSet<Position> = body[..keep].iter().copied().collect();

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(pos) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = pos.moved_in_direction(dir);
            if state.is_in_bounds(next) && !blocked.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, Snake};

    #[test]
    fn test_heads_for_food() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(5, 1),
            10,
            10,
        );

        assert_eq!(Autopilot::new().choose(&state), Action::Steer(Direction::Up));
    }

    #[test]
    fn test_prefers_straight_on_ties() {
        // Up and Right both end three cells from the food
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 1),
            Position::new(7, 3),
            10,
            10,
        );

        assert_eq!(
            Autopilot::new().choose(&state),
            Action::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_avoids_wall() {
        let state = GameState::new(
            Snake::new(Position::new(9, 5), Direction::Right, 2),
            Position::new(0, 0),
            10,
            10,
        );

        let action = Autopilot::new().choose(&state);
        assert_eq!(action, Action::Steer(Direction::Up));
    }

    #[test]
    fn test_avoids_pocket() {
        // The body rings (2,2); food sits inside the ring, open board lies to the left
        let snake = Snake {
            body: vec![
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
                Position::new(3, 1),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 0),
            ],
            direction: Direction::Up,
        };
        let state = GameState::new(snake, Position::new(2, 2), 6, 6);

        let action = Autopilot::new().choose(&state);
        assert_eq!(action, Action::Steer(Direction::Left));
    }

    #[test]
    fn test_survives_many_ticks() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        let pilot = Autopilot::new();

        for _ in 0..200 {
            let action = pilot.choose(&state);
            engine.step(&mut state, action);
            if !state.is_alive() {
                break;
            }
        }

        assert!(state.score > 0);
    }
}
