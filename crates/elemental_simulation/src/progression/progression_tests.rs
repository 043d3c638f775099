//! Tests for progression rules and persistence.

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::catalog::{Element, CHAPTERS};

    #[test]
    fn test_default_progress() {
        let progress = PlatformProgress::default();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.global_score, 0);
        assert!(progress.is_element_unlocked(Element::Earth));
        assert!(!progress.is_element_unlocked(Element::Fire));
    }

    #[test]
    fn test_repeat_completion_keeps_high_score_and_inflates_global() {
        let mut progress = PlatformProgress::default();

        let first = progress.complete_level("earth", 4, 200);
        assert!(first.first_completion);
        assert!(first.new_high_score);

        let second = progress.complete_level("earth", 4, 50);
        assert!(!second.first_completion);
        assert!(!second.new_high_score);

        assert_eq!(progress.high_score("earth", 4), 200);
        assert_eq!(progress.global_score, 250);
        assert_eq!(progress.completed_level_count("earth"), 1);
    }

    #[test]
    fn test_level_one_always_unlocked() {
        let progress = PlatformProgress::default();
        for chapter in CHAPTERS.iter() {
            assert!(progress.is_level_unlocked(chapter.key, 1));
        }
        assert!(progress.is_level_unlocked("unknown_chapter", 1));
    }

    #[test]
    fn test_level_unlock_follows_previous_completion() {
        let mut progress = PlatformProgress::default();
        assert!(!progress.is_level_unlocked("earth", 2));

        progress.complete_level("earth", 1, 100);
        assert!(progress.is_level_unlocked("earth", 2));
        assert!(!progress.is_level_unlocked("earth", 3));

        // Пропуск уровня не открывает следующий за ним цепочкой
        progress.complete_level("earth", 3, 100);
        assert!(progress.is_level_unlocked("earth", 4));
        assert!(!progress.is_level_unlocked("earth", 3));
        assert!(!progress.is_level_unlocked("fire", 2));
    }

    #[test]
    fn test_chapter_completed_exactly_once() {
        let mut progress = PlatformProgress::default();

        for level in 1..=5 {
            let result = progress.complete_level("earth", level, 100);
            assert_eq!(result.chapter_completed, level == 5);
        }
        // Повторные прохождения после завершения
        progress.complete_level("earth", 5, 300);
        progress.complete_level("earth", 2, 300);

        assert_eq!(progress.completed_chapters, vec!["earth".to_string()]);
        assert_eq!(progress.level, 2);
        assert!(progress.is_chapter_unlocked(2));
        assert!(!progress.is_chapter_unlocked(3));
    }

    #[test]
    fn test_chapter_completion_unlocks_element() {
        let mut progress = PlatformProgress::default();
        for level in 1..=5 {
            progress.complete_level("fire", level, 10);
        }
        assert!(progress.is_element_unlocked(Element::Fire));
        assert_eq!(progress.unlocked_elements, vec!["earth".to_string(), "fire".to_string()]);
    }

    #[test]
    fn test_level_matches_completed_chapters() {
        let mut progress = PlatformProgress::default();
        for chapter in ["earth", "fire", "water"] {
            for level in 1..=5 {
                progress.complete_level(chapter, level, 1);
            }
            assert_eq!(progress.level as usize, progress.completed_chapters.len() + 1);
        }
        assert_eq!(progress.level, 4);
    }

    #[test]
    fn test_save_load_round_trip() {
        let storage = MemoryKeyValueStore::new();
        let mut store = ProgressStore::load(Box::new(storage.clone()));
        store.complete_level("earth", 1, 120);
        store.complete_level("earth", 2, 80);

        let reloaded = ProgressStore::load(Box::new(storage));
        assert_eq!(reloaded.progress(), store.progress());
        assert_eq!(reloaded.high_score("earth", 2), 80);
    }

    #[test]
    fn test_persisted_json_shape() {
        let mut progress = PlatformProgress::default();
        progress.complete_level("earth", 3, 150);

        let json: serde_json::Value = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["globalScore"], 150);
        assert_eq!(json["level"], 1);
        assert_eq!(json["completedLevels"]["earth"], serde_json::json!([3]));
        assert_eq!(json["highScores"]["earth_3"], 150);
        assert_eq!(json["unlockedElements"], serde_json::json!(["earth"]));
        assert_eq!(json["completedChapters"], serde_json::json!([]));
    }

    #[test]
    fn test_malformed_save_falls_back_to_default() {
        let mut storage = MemoryKeyValueStore::new();
        storage.set(PROGRESS_KEY, "{not json").unwrap();

        let store = ProgressStore::load(Box::new(storage.clone()));
        assert_eq!(store.progress(), &PlatformProgress::default());

        storage.set(PROGRESS_KEY, "").unwrap();
        assert!(matches!(read_progress(&storage), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_partial_save_is_normalized() {
        let mut storage = MemoryKeyValueStore::new();
        storage
            .set(PROGRESS_KEY, r#"{"globalScore": 900, "level": 7, "completedChapters": ["earth"]}"#)
            .unwrap();

        let store = ProgressStore::load(Box::new(storage));
        assert_eq!(store.progress().global_score, 900);
        assert_eq!(store.progress().level, 2);
        assert!(store.is_element_unlocked(Element::Earth));
    }

    #[test]
    fn test_unlock_all_overrides_chapter_gate() {
        let mut store = ProgressStore::in_memory();
        assert!(!store.is_chapter_unlocked(5));

        store.unlock_all = true;
        assert!(store.is_chapter_unlocked(18));
    }

    #[test]
    fn test_file_store_persists_between_sessions() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = ProgressStore::load(Box::new(FileKeyValueStore::new(dir.path())));
        store.complete_level("water", 1, 42);

        let reloaded = ProgressStore::load(Box::new(FileKeyValueStore::new(dir.path())));
        assert_eq!(reloaded.high_score("water", 1), 42);
        assert!(dir.path().join(format!("{}.json", PROGRESS_KEY)).exists());
    }

    #[test]
    fn test_reset_clears_saved_progress() {
        let storage = MemoryKeyValueStore::new();
        let mut store = ProgressStore::load(Box::new(storage.clone()));
        store.complete_level("earth", 1, 10);
        store.reset();

        let reloaded = ProgressStore::load(Box::new(storage));
        assert_eq!(reloaded.progress(), &PlatformProgress::default());
    }
}
