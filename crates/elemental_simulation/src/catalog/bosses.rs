//! Каталог боссов: mid + final на стихию, плюс ultimate босс
//!
//! Атака выбирается по фазе: `attacks[min(phase-1, len-1)]`.
//! Пустой список атак допустим: такой босс просто никогда не атакует.

use super::elements::Element;

/// Паттерн выпуска снарядов
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    /// Один снаряд в текущую позицию игрока
    Aimed,
    /// 5 снарядов веером -60°..+60° вокруг линии прицела
    Spread,
    /// 8 снарядов равномерно по кругу
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossAttack {
    pub key: &'static str,
    pub pattern: AttackPattern,
    pub projectile_speed: f32,
}

/// Паттерн движения босса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePattern {
    /// Колебания вокруг точки (sin по вертикали, cos по горизонтали)
    Hover,
    /// Орбита вокруг центра арены
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossTier {
    Mid,
    Final,
    Ultimate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossType {
    pub key: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub tier: BossTier,
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
    pub attacks: &'static [BossAttack],
    pub move_pattern: MovePattern,
}

impl BossType {
    /// Final-tier боссы (и ultimate) имеют третью фазу и больший вес в счёте
    pub fn is_final(&self) -> bool {
        matches!(self.tier, BossTier::Final | BossTier::Ultimate)
    }
}

const BOLT: BossAttack = BossAttack { key: "bolt", pattern: AttackPattern::Aimed, projectile_speed: 320.0 };
const FAN: BossAttack = BossAttack { key: "fan", pattern: AttackPattern::Spread, projectile_speed: 280.0 };
const NOVA: BossAttack = BossAttack { key: "nova", pattern: AttackPattern::Circle, projectile_speed: 240.0 };
const CATACLYSM: BossAttack = BossAttack { key: "cataclysm", pattern: AttackPattern::Circle, projectile_speed: 330.0 };

pub const MID_ATTACKS: &[BossAttack] = &[BOLT, FAN];
pub const FINAL_ATTACKS: &[BossAttack] = &[BOLT, FAN, NOVA];
pub const ULTIMATE_ATTACKS: &[BossAttack] = &[FAN, NOVA, CATACLYSM];

const fn mid(key: &'static str, name: &'static str, element: Element, health: u32, damage: u32, speed: f32) -> BossType {
    BossType {
        key,
        name,
        element,
        tier: BossTier::Mid,
        health,
        damage,
        speed,
        attacks: MID_ATTACKS,
        move_pattern: MovePattern::Hover,
    }
}

const fn fin(key: &'static str, name: &'static str, element: Element, health: u32, damage: u32, speed: f32) -> BossType {
    BossType {
        key,
        name,
        element,
        tier: BossTier::Final,
        health,
        damage,
        speed,
        attacks: FINAL_ATTACKS,
        move_pattern: MovePattern::Circle,
    }
}

use super::elements::Element as E;

pub static BOSS_TYPES: [BossType; 34] = [
    mid("golem_warden", "Golem Warden", E::Earth, 300, 15, 80.0),
    fin("mountain_titan", "Mountain Titan", E::Earth, 600, 20, 90.0),
    mid("blaze_lord", "Blaze Lord", E::Fire, 320, 16, 90.0),
    fin("inferno_drake", "Inferno Drake", E::Fire, 640, 22, 100.0),
    mid("tide_serpent", "Tide Serpent", E::Water, 340, 16, 90.0),
    fin("leviathan", "Leviathan", E::Water, 680, 22, 95.0),
    mid("gale_harpy", "Gale Harpy", E::Air, 360, 17, 110.0),
    fin("storm_roc", "Storm Roc", E::Air, 720, 23, 120.0),
    mid("frost_giant", "Frost Giant", E::Ice, 380, 18, 80.0),
    fin("glacier_queen", "Glacier Queen", E::Ice, 760, 24, 95.0),
    mid("volt_wyvern", "Volt Wyvern", E::Lightning, 400, 18, 120.0),
    fin("thunder_god", "Thunder God", E::Lightning, 800, 25, 125.0),
    mid("ancient_treant", "Ancient Treant", E::Nature, 420, 19, 70.0),
    fin("verdant_hydra", "Verdant Hydra", E::Nature, 840, 26, 90.0),
    mid("iron_colossus", "Iron Colossus", E::Metal, 440, 20, 75.0),
    fin("chrome_overlord", "Chrome Overlord", E::Metal, 880, 27, 100.0),
    mid("radiant_seraph", "Radiant Seraph", E::Light, 460, 20, 115.0),
    fin("solar_archon", "Solar Archon", E::Light, 920, 28, 120.0),
    mid("umbral_knight", "Umbral Knight", E::Shadow, 480, 21, 110.0),
    fin("night_emperor", "Night Emperor", E::Shadow, 960, 29, 120.0),
    mid("plague_mother", "Plague Mother", E::Poison, 500, 22, 85.0),
    fin("blight_wyrm", "Blight Wyrm", E::Poison, 1000, 30, 100.0),
    mid("prism_guardian", "Prism Guardian", E::Crystal, 520, 22, 90.0),
    fin("diamond_sovereign", "Diamond Sovereign", E::Crystal, 1040, 31, 105.0),
    mid("sand_pharaoh", "Sand Pharaoh", E::Sand, 540, 23, 95.0),
    fin("desert_sphinx", "Desert Sphinx", E::Sand, 1080, 32, 110.0),
    mid("magma_behemoth", "Magma Behemoth", E::Magma, 560, 24, 80.0),
    fin("volcano_king", "Volcano King", E::Magma, 1120, 33, 100.0),
    mid("cyclone_djinn", "Cyclone Djinn", E::Storm, 580, 24, 125.0),
    fin("hurricane_lord", "Hurricane Lord", E::Storm, 1160, 34, 130.0),
    mid("spectral_monk", "Spectral Monk", E::Spirit, 600, 25, 110.0),
    fin("soul_reaper", "Soul Reaper", E::Spirit, 1200, 35, 120.0),
    mid("rift_warden", "Rift Warden", E::Void, 620, 26, 115.0),
    fin("void_devourer", "Void Devourer", E::Void, 1240, 36, 125.0),
];

/// Ultimate босс: финал всей игры (отдельная глава)
pub static ULTIMATE_BOSS: BossType = BossType {
    key: "elemental_sovereign",
    name: "Elemental Sovereign",
    element: Element::Void,
    tier: BossTier::Ultimate,
    health: 2000,
    damage: 40,
    speed: 130.0,
    attacks: ULTIMATE_ATTACKS,
    move_pattern: MovePattern::Circle,
};

/// Босс стихии нужного тира (Ultimate не зависит от стихии)
pub fn boss_for(element: Element, tier: BossTier) -> &'static BossType {
    if tier == BossTier::Ultimate {
        return &ULTIMATE_BOSS;
    }

    BOSS_TYPES
        .iter()
        .find(|b| b.element == element && b.tier == tier)
        .unwrap_or(&ULTIMATE_BOSS)
}

#[cfg(test)]
pub fn boss_type(key: &str) -> Option<&'static BossType> {
    BOSS_TYPES
        .iter()
        .chain(std::iter::once(&ULTIMATE_BOSS))
        .find(|b| b.key == key)
}
