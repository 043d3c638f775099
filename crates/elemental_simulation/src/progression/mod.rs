//! Progression module: главы/уровни, рекорды, сейв
//!
//! Не ECS-логика: `ProgressStore` это обычный Resource, мутируется сессией
//! при завершении уровня и хостом (меню выбора главы).

pub mod progress;
pub mod storage;
pub mod store;

#[cfg(test)]
mod progression_tests;

// Re-export основных типов
pub use progress::{high_score_key, CompletionResult, PlatformProgress, CHAPTER_COMPLETION_THRESHOLD};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError, StorageResult};
pub use store::{read_progress, write_progress, ProgressStore, PROGRESS_KEY};
