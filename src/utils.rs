pub mod log;
pub mod misc;

pub use misc::time_to_string;
