pub mod play;
pub mod simulate;
mod terminal;
pub mod watch;

pub use play::PlayMode;
pub use simulate::{SimulateConfig, SimulateMode, SimulationSummary};
pub use watch::{WatchMode, WatchSpeed};
