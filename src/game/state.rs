use std::fmt;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Heading used on the next advance
    pub direction: Direction,
}

impl Snake {
    /// Lay out `length` segments trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let trail = direction.opposite();
        let body = std::iter::successors(Some(head), |pos| Some(pos.moved_in_direction(trail)))
            .take(length.max(1))
            .collect();

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Whether `pos` hits the snake after it advances.
    ///
    /// When the snake is not growing its tail leaves its cell during the same
    /// tick, so that cell is free to move into.
    pub fn blocks(&self, pos: Position, growing: bool) -> bool {
        let solid = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        solid.contains(&pos)
    }

    /// Push a new head in the current direction, keeping the tail when growing
    pub fn advance(&mut self, grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEnd {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// Snake filled every cell, leaving nowhere to put food
    BoardCleared,
}

impl fmt::Display for RoundEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RoundEnd::Wall => "hit the wall",
            RoundEnd::SelfCollision => "ran into itself",
            RoundEnd::BoardCleared => "cleared the board",
        };
        f.write_str(text)
    }
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake covers the whole grid
    pub food: Option<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub round_over: Option<RoundEnd>,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food: Some(food),
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            round_over: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.round_over.is_none()
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// Every in-bounds cell not covered by the snake, row by row
    pub fn free_cells(&self) -> Vec<Position> {
        free_cells(&self.snake, self.grid_width, self.grid_height)
    }
}

pub(crate) fn free_cells(snake: &Snake, grid_width: usize, grid_height: usize) -> Vec<Position> {
    (0..grid_height as i32)
        .flat_map(|y| (0..grid_width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !snake.body.contains(pos))
        .collect()
}
