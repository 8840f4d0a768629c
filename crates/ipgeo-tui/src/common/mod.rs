//! Shared helpers for TUI features.

mod task;
pub mod text;
mod text_field;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{truncate_start_with_ellipsis, truncate_with_ellipsis};
pub use text_field::TextField;
