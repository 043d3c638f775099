//! Состояние уровня, запросы и события сессии

use bevy::prelude::*;

use crate::catalog::{ChapterDef, Element, LevelKind};

/// Маркер: entity принадлежит уровню (удаляется при teardown)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SessionPhase {
    Playing,
    /// Герой погиб, ждём респавн
    Respawning,
    /// Уровень пройден, ждём выход
    Completed,
    /// Жизни кончились, ждём выход в выбор уровня
    GameOver,
}

/// Активный уровень (Resource существует только пока уровень запущен)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelSession {
    pub chapter: &'static ChapterDef,
    pub level_number: u32,
    pub element: Element,
    pub kind: LevelKind,
    pub phase: SessionPhase,
    pub score: u32,
    pub elapsed_ms: f64,
    pub lives: u32,
    pub paused: bool,
    pub hero_spawn: Vec2,
}

impl LevelSession {
    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Очки идут и пока герой ждёт респавн (снаряды в полёте, death sequence босса)
    pub fn accepts_score(&self) -> bool {
        matches!(self.phase, SessionPhase::Playing | SessionPhase::Respawning)
    }

    pub fn scene_request(&self, scene: SceneTarget) -> SceneRequest {
        SceneRequest {
            scene,
            chapter_key: self.chapter.key,
            level_number: self.level_number,
            element: self.element,
        }
    }
}

/// Запрос запуска уровня (от хоста / меню)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LevelRequest {
    pub chapter_key: String,
    pub level_number: u32,
    pub element: Element,
}

impl LevelRequest {
    pub fn new(chapter_key: impl Into<String>, level_number: u32, element: Element) -> Self {
        Self {
            chapter_key: chapter_key.into(),
            level_number,
            element,
        }
    }
}

/// Куда хост должен переключить сцену
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SceneTarget {
    LevelSelect,
    ChapterSelect,
    Menu,
}

/// Event: запрос смены сцены (session → хост)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SceneRequest {
    pub scene: SceneTarget,
    pub chapter_key: &'static str,
    pub level_number: u32,
    pub element: Element,
}

/// Event: управление сессией от хоста
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Pause,
    Resume,
    Quit,
}

/// Event: уровень пройден, прогресс сохранён
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LevelCompleted {
    pub chapter_key: &'static str,
    pub level_number: u32,
    pub final_score: u32,
    pub first_completion: bool,
    pub new_high_score: bool,
    pub chapter_completed: bool,
}

/// Run condition: уровень запущен и не на паузе
pub fn session_running(session: Option<Res<LevelSession>>) -> bool {
    session.is_some_and(|session| !session.paused)
}
