pub mod attachment;
pub mod client;
pub mod context;
pub mod engine;
pub mod prompt;
pub mod verdict;

#[cfg(test)]
pub mod testing;
