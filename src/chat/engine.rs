mod engine;
mod error;

pub use engine::{ChatEngine, ChatOutcome, ChatTurn};
pub use error::ChatError;
