mod habit;
mod habit_log;

pub use habit::*;
pub use habit_log::*;
