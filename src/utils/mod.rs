pub mod time_input;
