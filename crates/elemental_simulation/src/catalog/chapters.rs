//! Главы: по одной на стихию + финальная глава с ultimate боссом
//!
//! Раскладка уровней внутри главы:
//! - средний уровень (3 из 5): mid босс
//! - последний уровень: final-tier босс
//! - глава `nexus`: один уровень с ultimate боссом

use super::bosses::BossTier;
use super::elements::Element;

/// Стандартное число уровней в главе
pub const STANDARD_LEVEL_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDef {
    pub key: &'static str,
    pub name: &'static str,
    pub element: Element,
    /// Минимальный уровень игрока для открытия главы
    pub required_level: u32,
    pub level_count: u32,
    pub is_ultimate: bool,
}

/// Тип уровня внутри главы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Standard,
    Boss(BossTier),
}

impl LevelKind {
    pub fn is_boss(&self) -> bool {
        matches!(self, LevelKind::Boss(_))
    }
}

impl ChapterDef {
    pub fn level_kind(&self, level_number: u32) -> LevelKind {
        if self.is_ultimate {
            return LevelKind::Boss(BossTier::Ultimate);
        }

        if level_number >= self.level_count {
            LevelKind::Boss(BossTier::Final)
        } else if self.level_count >= 3 && level_number == (self.level_count + 1) / 2 {
            LevelKind::Boss(BossTier::Mid)
        } else {
            LevelKind::Standard
        }
    }
}

const fn chapter(key: &'static str, name: &'static str, element: Element, required_level: u32) -> ChapterDef {
    ChapterDef {
        key,
        name,
        element,
        required_level,
        level_count: STANDARD_LEVEL_COUNT,
        is_ultimate: false,
    }
}

use super::elements::Element as E;

pub static CHAPTERS: [ChapterDef; 18] = [
    chapter("earth", "Quaking Hollows", E::Earth, 1),
    chapter("fire", "Ember Wastes", E::Fire, 2),
    chapter("water", "Sunken Reef", E::Water, 3),
    chapter("air", "Skyward Spires", E::Air, 4),
    chapter("ice", "Frozen Expanse", E::Ice, 5),
    chapter("lightning", "Voltaic Heights", E::Lightning, 6),
    chapter("nature", "Overgrown Wilds", E::Nature, 7),
    chapter("metal", "Iron Foundry", E::Metal, 8),
    chapter("light", "Radiant Sanctum", E::Light, 9),
    chapter("shadow", "Umbral Depths", E::Shadow, 10),
    chapter("poison", "Blighted Marsh", E::Poison, 11),
    chapter("crystal", "Prismatic Caverns", E::Crystal, 12),
    chapter("sand", "Shifting Dunes", E::Sand, 13),
    chapter("magma", "Molten Core", E::Magma, 14),
    chapter("storm", "Tempest Peaks", E::Storm, 15),
    chapter("spirit", "Ethereal Vale", E::Spirit, 16),
    chapter("void", "The Rift", E::Void, 17),
    ChapterDef {
        key: "nexus",
        name: "Elemental Nexus",
        element: E::Void,
        required_level: 18,
        level_count: 1,
        is_ultimate: true,
    },
];

pub fn find_chapter(key: &str) -> Option<&'static ChapterDef> {
    CHAPTERS.iter().find(|c| c.key == key)
}

/// Lookup с fallback: неизвестный ключ → первая глава
pub fn chapter_or_first(key: &str) -> &'static ChapterDef {
    find_chapter(key).unwrap_or_else(|| {
        crate::log_warning(&format!("Catalog: unknown chapter '{}' → fallback '{}'", key, CHAPTERS[0].key));
        &CHAPTERS[0]
    })
}
