pub mod analog_clock;
pub mod clock_hand;

pub use analog_clock::*;
pub use clock_hand::*;
