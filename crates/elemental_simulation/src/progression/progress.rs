//! PlatformProgress: открытие глав/уровней, рекорды, общий счёт
//!
//! Инвариант: `level == completed_chapters.len() + 1`.
//! Глава завершена, когда в её наборе 5 пройденных уровней (порог не зависит от главы).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::Element;

/// Сколько уровней нужно пройти для завершения главы
pub const CHAPTER_COMPLETION_THRESHOLD: usize = 5;

/// Что изменилось после `complete_level`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionResult {
    /// Уровень пройден впервые
    pub first_completion: bool,
    pub new_high_score: bool,
    /// Глава завершилась этим прохождением
    pub chapter_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformProgress {
    pub global_score: u64,
    pub level: u32,
    /// В порядке завершения, без повторов
    pub completed_chapters: Vec<String>,
    pub completed_levels: BTreeMap<String, BTreeSet<u32>>,
    /// Ключ: `<chapter>_<level>`
    pub high_scores: BTreeMap<String, u32>,
    pub unlocked_elements: Vec<String>,
}

impl Default for PlatformProgress {
    fn default() -> Self {
        Self {
            global_score: 0,
            level: 1,
            completed_chapters: Vec::new(),
            completed_levels: BTreeMap::new(),
            high_scores: BTreeMap::new(),
            unlocked_elements: vec![Element::Earth.key().to_string()],
        }
    }
}

pub fn high_score_key(chapter: &str, level: u32) -> String {
    format!("{}_{}", chapter, level)
}

impl PlatformProgress {
    /// Отметить уровень пройденным.
    ///
    /// Повторное прохождение: отметка идемпотентна, рекорд = max,
    /// но `global_score` растёт всегда.
    pub fn complete_level(&mut self, chapter: &str, level: u32, score: u32) -> CompletionResult {
        let first_completion = self
            .completed_levels
            .entry(chapter.to_string())
            .or_default()
            .insert(level);

        let key = high_score_key(chapter, level);
        let best = self.high_scores.entry(key).or_insert(0);
        let new_high_score = score > *best;
        if new_high_score {
            *best = score;
        }

        self.global_score += score as u64;

        let chapter_completed =
            self.completed_level_count(chapter) >= CHAPTER_COMPLETION_THRESHOLD && !self.is_chapter_completed(chapter);
        if chapter_completed {
            self.completed_chapters.push(chapter.to_string());

            // Завершённая глава стихии открывает героя этой стихии
            if let Some(element) = Element::from_key(chapter) {
                self.unlock_element(element);
            }
        }

        self.normalize();

        CompletionResult {
            first_completion,
            new_high_score,
            chapter_completed,
        }
    }

    /// Восстановить инвариант уровня (после загрузки или завершения главы)
    pub fn normalize(&mut self) {
        self.level = self.completed_chapters.len() as u32 + 1;

        let earth = Element::Earth.key();
        if !self.unlocked_elements.iter().any(|e| e == earth) {
            self.unlocked_elements.insert(0, earth.to_string());
        }
    }

    pub fn is_chapter_unlocked(&self, required_level: u32) -> bool {
        self.level >= required_level
    }

    /// Первый уровень открыт всегда, n-й: если пройден (n-1)-й
    pub fn is_level_unlocked(&self, chapter: &str, level: u32) -> bool {
        level <= 1 || self.is_level_completed(chapter, level - 1)
    }

    pub fn is_level_completed(&self, chapter: &str, level: u32) -> bool {
        self.completed_levels
            .get(chapter)
            .is_some_and(|levels| levels.contains(&level))
    }

    pub fn completed_level_count(&self, chapter: &str) -> usize {
        self.completed_levels.get(chapter).map_or(0, |levels| levels.len())
    }

    pub fn is_chapter_completed(&self, chapter: &str) -> bool {
        self.completed_chapters.iter().any(|c| c == chapter)
    }

    pub fn high_score(&self, chapter: &str, level: u32) -> u32 {
        self.high_scores
            .get(&high_score_key(chapter, level))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_element_unlocked(&self, element: Element) -> bool {
        self.unlocked_elements.iter().any(|e| e == element.key())
    }

    pub fn unlock_element(&mut self, element: Element) {
        if !self.is_element_unlocked(element) {
            self.unlocked_elements.push(element.key().to_string());
        }
    }
}
