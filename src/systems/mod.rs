pub mod clock_hands;
pub mod clock_tick;

pub use clock_hands::*;
pub use clock_tick::*;
