//! ProgressStore (Resource): PlatformProgress + хранилище
//!
//! Загрузка при создании, сохранение после каждой мутации.
//! Ошибки хранилища не выходят наружу: логируются, прогресс = default.

use bevy::prelude::*;

use super::progress::{CompletionResult, PlatformProgress};
use super::storage::{KeyValueStore, MemoryKeyValueStore, StorageError, StorageResult};
use crate::catalog::Element;

/// Фиксированный ключ сейва
pub const PROGRESS_KEY: &str = "elemental_platformer_progress";

#[derive(Resource)]
pub struct ProgressStore {
    progress: PlatformProgress,
    storage: Box<dyn KeyValueStore>,
    /// Debug: все главы открыты
    pub unlock_all: bool,
}

/// Прочитать и распарсить сейв. `Ok(None)`: сейва нет.
pub fn read_progress(storage: &dyn KeyValueStore) -> StorageResult<Option<PlatformProgress>> {
    let Some(raw) = storage.get(PROGRESS_KEY)? else {
        return Ok(None);
    };

    if raw.trim().is_empty() {
        return Err(StorageError::Corrupt("empty payload".to_string()));
    }

    let mut progress: PlatformProgress = serde_json::from_str(&raw)?;
    progress.normalize();
    Ok(Some(progress))
}

pub fn write_progress(storage: &mut dyn KeyValueStore, progress: &PlatformProgress) -> StorageResult<()> {
    let payload = serde_json::to_string(progress)?;
    storage.set(PROGRESS_KEY, &payload)
}

impl ProgressStore {
    /// Загрузить прогресс из хранилища (битый/отсутствующий сейв → default)
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let progress = match read_progress(&*storage) {
            Ok(Some(progress)) => {
                crate::log_info(&format!(
                    "💾 Progress loaded: level {}, score {}",
                    progress.level, progress.global_score
                ));
                progress
            }
            Ok(None) => {
                crate::log("💾 No saved progress, starting fresh");
                PlatformProgress::default()
            }
            Err(err) => {
                crate::log_error(&format!("💾 Failed to load progress ({}), starting fresh", err));
                PlatformProgress::default()
            }
        };

        Self {
            progress,
            storage,
            unlock_all: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryKeyValueStore::new()))
    }

    pub fn progress(&self) -> &PlatformProgress {
        &self.progress
    }

    fn save(&mut self) {
        if let Err(err) = write_progress(&mut *self.storage, &self.progress) {
            crate::log_error(&format!("💾 Failed to save progress: {}", err));
        }
    }

    pub fn complete_level(&mut self, chapter: &str, level: u32, score: u32) -> CompletionResult {
        let result = self.progress.complete_level(chapter, level, score);
        self.save();

        if result.chapter_completed {
            crate::log_info(&format!("🏅 Chapter '{}' completed → level {}", chapter, self.progress.level));
        }
        result
    }

    pub fn is_chapter_unlocked(&self, required_level: u32) -> bool {
        self.unlock_all || self.progress.is_chapter_unlocked(required_level)
    }

    pub fn is_level_unlocked(&self, chapter: &str, level: u32) -> bool {
        self.progress.is_level_unlocked(chapter, level)
    }

    pub fn is_level_completed(&self, chapter: &str, level: u32) -> bool {
        self.progress.is_level_completed(chapter, level)
    }

    pub fn completed_level_count(&self, chapter: &str) -> usize {
        self.progress.completed_level_count(chapter)
    }

    pub fn high_score(&self, chapter: &str, level: u32) -> u32 {
        self.progress.high_score(chapter, level)
    }

    pub fn is_element_unlocked(&self, element: Element) -> bool {
        self.progress.is_element_unlocked(element)
    }

    /// Сбросить прогресс (и сейв)
    pub fn reset(&mut self) {
        self.progress = PlatformProgress::default();
        self.save();
        crate::log_info("💾 Progress reset");
    }
}
