pub mod clock;
pub mod clock_control;
pub mod clock_face;
