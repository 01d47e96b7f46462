pub mod cli;
pub mod clock_config;
pub mod wall_clock;

pub use cli::*;
pub use clock_config::*;
pub use wall_clock::*;
