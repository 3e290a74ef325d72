//! Drill results: the attempt entity and its storage interface

pub mod attempt;
pub mod storage;

// Re-export commonly used types
pub use attempt::{Attempt, AttemptRecord};
pub use storage::{CombineStorage, InMemoryCombineStorage, MockCombineStorage};
