// ABOUTME: Request history persistence for Speccraft
// ABOUTME: Stores each pipeline invocation keyed by user, retrievable most-recent-first

pub mod storage;
pub mod types;

pub use storage::{HistoryError, HistoryStorage, Result};
pub use types::{RequestKind, SpecRequestRecord};
