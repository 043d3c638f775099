//! Стихии (17 штук): ключи глав, героев и ростеров врагов

use bevy::prelude::*;

/// Стихия героя / главы / врага
///
/// Порядок в `ALL` = порядок глав (earth открыта с самого начала).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum Element {
    Earth,
    Fire,
    Water,
    Air,
    Ice,
    Lightning,
    Nature,
    Metal,
    Light,
    Shadow,
    Poison,
    Crystal,
    Sand,
    Magma,
    Storm,
    Spirit,
    Void,
}

impl Element {
    pub const ALL: [Element; 17] = [
        Element::Earth,
        Element::Fire,
        Element::Water,
        Element::Air,
        Element::Ice,
        Element::Lightning,
        Element::Nature,
        Element::Metal,
        Element::Light,
        Element::Shadow,
        Element::Poison,
        Element::Crystal,
        Element::Sand,
        Element::Magma,
        Element::Storm,
        Element::Spirit,
        Element::Void,
    ];

    /// Стабильный строковый ключ (используется в сейве)
    pub fn key(&self) -> &'static str {
        match self {
            Element::Earth => "earth",
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Air => "air",
            Element::Ice => "ice",
            Element::Lightning => "lightning",
            Element::Nature => "nature",
            Element::Metal => "metal",
            Element::Light => "light",
            Element::Shadow => "shadow",
            Element::Poison => "poison",
            Element::Crystal => "crystal",
            Element::Sand => "sand",
            Element::Magma => "magma",
            Element::Storm => "storm",
            Element::Spirit => "spirit",
            Element::Void => "void",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Element::Earth => "Earth",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Air => "Air",
            Element::Ice => "Ice",
            Element::Lightning => "Lightning",
            Element::Nature => "Nature",
            Element::Metal => "Metal",
            Element::Light => "Light",
            Element::Shadow => "Shadow",
            Element::Poison => "Poison",
            Element::Crystal => "Crystal",
            Element::Sand => "Sand",
            Element::Magma => "Magma",
            Element::Storm => "Storm",
            Element::Spirit => "Spirit",
            Element::Void => "Void",
        }
    }

    pub fn from_key(key: &str) -> Option<Element> {
        Self::ALL.iter().copied().find(|e| e.key() == key)
    }

    /// Порядковый номер (0 = earth), он же "сложность" стихии
    pub fn tier(&self) -> u32 {
        Self::ALL.iter().position(|e| e == self).unwrap_or(0) as u32
    }
}

impl Default for Element {
    fn default() -> Self {
        Element::Earth
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
