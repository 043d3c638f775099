//! Каталог типов врагов (4 на стихию, read-only)
//!
//! Поведение задаётся тегом. Тегов ~20, но реализованных движений 4:
//! patrol / chase / hover (fly_shoot, hover_shoot) / stationary.
//! Остальные теги: флейвор для отображения, по движению это patrol.

use super::elements::Element;

/// Тег поведения врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyBehavior {
    Patrol,
    Chase,
    FlyShoot,
    HoverShoot,
    StationaryShoot,
    Stationary,
    Charge,
    Burrow,
    Hop,
    Swarm,
    Dive,
    Ambush,
    Teleport,
    Guard,
    Roll,
    Float,
    Slither,
    Stomp,
    Drift,
    Lurk,
}

/// Реально реализованные примитивы движения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPrimitive {
    Patrol,
    Chase,
    Hover,
    Stationary,
}

impl EnemyBehavior {
    pub const ALL: [EnemyBehavior; 20] = [
        EnemyBehavior::Patrol,
        EnemyBehavior::Chase,
        EnemyBehavior::FlyShoot,
        EnemyBehavior::HoverShoot,
        EnemyBehavior::StationaryShoot,
        EnemyBehavior::Stationary,
        EnemyBehavior::Charge,
        EnemyBehavior::Burrow,
        EnemyBehavior::Hop,
        EnemyBehavior::Swarm,
        EnemyBehavior::Dive,
        EnemyBehavior::Ambush,
        EnemyBehavior::Teleport,
        EnemyBehavior::Guard,
        EnemyBehavior::Roll,
        EnemyBehavior::Float,
        EnemyBehavior::Slither,
        EnemyBehavior::Stomp,
        EnemyBehavior::Drift,
        EnemyBehavior::Lurk,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            EnemyBehavior::Patrol => "patrol",
            EnemyBehavior::Chase => "chase",
            EnemyBehavior::FlyShoot => "fly_shoot",
            EnemyBehavior::HoverShoot => "hover_shoot",
            EnemyBehavior::StationaryShoot => "stationary_shoot",
            EnemyBehavior::Stationary => "stationary",
            EnemyBehavior::Charge => "charge",
            EnemyBehavior::Burrow => "burrow",
            EnemyBehavior::Hop => "hop",
            EnemyBehavior::Swarm => "swarm",
            EnemyBehavior::Dive => "dive",
            EnemyBehavior::Ambush => "ambush",
            EnemyBehavior::Teleport => "teleport",
            EnemyBehavior::Guard => "guard",
            EnemyBehavior::Roll => "roll",
            EnemyBehavior::Float => "float",
            EnemyBehavior::Slither => "slither",
            EnemyBehavior::Stomp => "stomp",
            EnemyBehavior::Drift => "drift",
            EnemyBehavior::Lurk => "lurk",
        }
    }

    /// Парсинг тега. Неизвестный тег: это patrol, не ошибка.
    pub fn from_tag(tag: &str) -> EnemyBehavior {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.tag() == tag)
            .unwrap_or_else(|| {
                crate::log(&format!("AI: unknown behavior tag '{}' → patrol", tag));
                EnemyBehavior::Patrol
            })
    }

    pub fn movement(&self) -> MovementPrimitive {
        match self {
            EnemyBehavior::Chase => MovementPrimitive::Chase,
            EnemyBehavior::FlyShoot | EnemyBehavior::HoverShoot => MovementPrimitive::Hover,
            EnemyBehavior::Stationary | EnemyBehavior::StationaryShoot => MovementPrimitive::Stationary,
            // флейвор-теги: default case
            _ => MovementPrimitive::Patrol,
        }
    }

    /// Стреляет ли враг этого поведения
    pub fn shoots(&self) -> bool {
        matches!(
            self,
            EnemyBehavior::FlyShoot | EnemyBehavior::HoverShoot | EnemyBehavior::StationaryShoot
        )
    }

    /// Летает (без гравитации)
    pub fn flies(&self) -> bool {
        self.movement() == MovementPrimitive::Hover
    }
}

/// Статический тип врага
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyType {
    pub key: &'static str,
    pub name: &'static str,
    pub element: Element,
    pub health: u32,
    pub damage: u32,
    pub speed: f32,
    pub behavior: EnemyBehavior,
}

const fn enemy(
    key: &'static str,
    name: &'static str,
    element: Element,
    health: u32,
    damage: u32,
    speed: f32,
    behavior: EnemyBehavior,
) -> EnemyType {
    EnemyType { key, name, element, health, damage, speed, behavior }
}

use self::EnemyBehavior as B;
use super::elements::Element as E;

pub static ENEMY_TYPES: [EnemyType; 68] = [
    // Earth
    enemy("mudling", "Mudling", E::Earth, 30, 10, 60.0, B::Patrol),
    enemy("rock_beetle", "Rock Beetle", E::Earth, 40, 12, 90.0, B::Chase),
    enemy("pebble_bat", "Pebble Bat", E::Earth, 25, 8, 90.0, B::FlyShoot),
    enemy("stone_sentry", "Stone Sentry", E::Earth, 50, 10, 0.0, B::StationaryShoot),
    // Fire
    enemy("ember_imp", "Ember Imp", E::Fire, 35, 12, 70.0, B::Hop),
    enemy("flame_hound", "Flame Hound", E::Fire, 45, 14, 120.0, B::Chase),
    enemy("cinder_wisp", "Cinder Wisp", E::Fire, 30, 10, 100.0, B::HoverShoot),
    enemy("magma_turret", "Magma Turret", E::Fire, 55, 12, 0.0, B::StationaryShoot),
    // Water
    enemy("bubble_crab", "Bubble Crab", E::Water, 40, 11, 60.0, B::Patrol),
    enemy("reef_eel", "Reef Eel", E::Water, 40, 13, 110.0, B::Slither),
    enemy("spray_gull", "Spray Gull", E::Water, 30, 10, 110.0, B::FlyShoot),
    enemy("tide_shell", "Tide Shell", E::Water, 60, 12, 0.0, B::Stationary),
    // Air
    enemy("gust_sprite", "Gust Sprite", E::Air, 35, 11, 120.0, B::HoverShoot),
    enemy("cloud_puff", "Cloud Puff", E::Air, 40, 10, 70.0, B::Drift),
    enemy("wind_falcon", "Wind Falcon", E::Air, 35, 14, 140.0, B::Dive),
    enemy("cyclone_totem", "Cyclone Totem", E::Air, 60, 13, 0.0, B::StationaryShoot),
    // Ice
    enemy("frost_slime", "Frost Slime", E::Ice, 45, 12, 55.0, B::Patrol),
    enemy("ice_wolf", "Ice Wolf", E::Ice, 50, 15, 125.0, B::Chase),
    enemy("snow_owl", "Snow Owl", E::Ice, 35, 12, 100.0, B::FlyShoot),
    enemy("icicle_spire", "Icicle Spire", E::Ice, 65, 14, 0.0, B::StationaryShoot),
    // Lightning
    enemy("spark_mite", "Spark Mite", E::Lightning, 40, 13, 90.0, B::Swarm),
    enemy("volt_runner", "Volt Runner", E::Lightning, 50, 15, 150.0, B::Chase),
    enemy("storm_drone", "Storm Drone", E::Lightning, 40, 12, 110.0, B::HoverShoot),
    enemy("tesla_coil", "Tesla Coil", E::Lightning, 70, 14, 0.0, B::StationaryShoot),
    // Nature
    enemy("thorn_crawler", "Thorn Crawler", E::Nature, 50, 13, 60.0, B::Patrol),
    enemy("vine_snapper", "Vine Snapper", E::Nature, 65, 16, 0.0, B::Ambush),
    enemy("pollen_moth", "Pollen Moth", E::Nature, 40, 12, 95.0, B::FlyShoot),
    enemy("bark_boar", "Bark Boar", E::Nature, 60, 17, 130.0, B::Charge),
    // Metal
    enemy("rust_bot", "Rust Bot", E::Metal, 60, 14, 65.0, B::Guard),
    enemy("gear_hound", "Gear Hound", E::Metal, 60, 17, 135.0, B::Chase),
    enemy("drone_scout", "Drone Scout", E::Metal, 45, 13, 115.0, B::HoverShoot),
    enemy("iron_cannon", "Iron Cannon", E::Metal, 80, 16, 0.0, B::StationaryShoot),
    // Light
    enemy("glimmer_sprite", "Glimmer Sprite", E::Light, 50, 14, 120.0, B::Float),
    enemy("prism_knight", "Prism Knight", E::Light, 70, 17, 110.0, B::Chase),
    enemy("halo_eye", "Halo Eye", E::Light, 50, 14, 105.0, B::HoverShoot),
    enemy("sun_obelisk", "Sun Obelisk", E::Light, 85, 16, 0.0, B::StationaryShoot),
    // Shadow
    enemy("shade", "Shade", E::Shadow, 55, 15, 80.0, B::Lurk),
    enemy("night_stalker", "Night Stalker", E::Shadow, 70, 18, 145.0, B::Chase),
    enemy("gloom_bat", "Gloom Bat", E::Shadow, 50, 14, 120.0, B::FlyShoot),
    enemy("void_gazer", "Void Gazer", E::Shadow, 85, 17, 0.0, B::Teleport),
    // Poison
    enemy("toxic_slug", "Toxic Slug", E::Poison, 65, 15, 50.0, B::Patrol),
    enemy("venom_spider", "Venom Spider", E::Poison, 65, 18, 130.0, B::Chase),
    enemy("spore_floater", "Spore Floater", E::Poison, 55, 15, 95.0, B::HoverShoot),
    enemy("acid_spitter", "Acid Spitter", E::Poison, 90, 17, 0.0, B::StationaryShoot),
    // Crystal
    enemy("shard_crab", "Shard Crab", E::Crystal, 75, 16, 70.0, B::Roll),
    enemy("gem_golem", "Gem Golem", E::Crystal, 90, 19, 100.0, B::Chase),
    enemy("crystal_wisp", "Crystal Wisp", E::Crystal, 60, 16, 110.0, B::FlyShoot),
    enemy("geode_turret", "Geode Turret", E::Crystal, 95, 18, 0.0, B::StationaryShoot),
    // Sand
    enemy("dune_worm", "Dune Worm", E::Sand, 80, 17, 80.0, B::Burrow),
    enemy("scarab_runner", "Scarab Runner", E::Sand, 75, 19, 150.0, B::Chase),
    enemy("sand_vulture", "Sand Vulture", E::Sand, 65, 16, 120.0, B::FlyShoot),
    enemy("sandstone_idol", "Sandstone Idol", E::Sand, 100, 18, 0.0, B::Stationary),
    // Magma
    enemy("lava_blob", "Lava Blob", E::Magma, 85, 18, 60.0, B::Patrol),
    enemy("obsidian_brute", "Obsidian Brute", E::Magma, 100, 21, 110.0, B::Stomp),
    enemy("ash_phoenix", "Ash Phoenix", E::Magma, 70, 18, 125.0, B::HoverShoot),
    enemy("vent_turret", "Vent Turret", E::Magma, 105, 20, 0.0, B::StationaryShoot),
    // Storm
    enemy("thunder_toad", "Thunder Toad", E::Storm, 90, 19, 90.0, B::Hop),
    enemy("squall_rider", "Squall Rider", E::Storm, 90, 21, 155.0, B::Chase),
    enemy("tempest_eye", "Tempest Eye", E::Storm, 75, 19, 120.0, B::FlyShoot),
    enemy("lightning_rod", "Lightning Rod", E::Storm, 110, 21, 0.0, B::StationaryShoot),
    // Spirit
    enemy("wandering_soul", "Wandering Soul", E::Spirit, 90, 20, 85.0, B::Drift),
    enemy("phantom_blade", "Phantom Blade", E::Spirit, 100, 22, 150.0, B::Chase),
    enemy("spirit_lantern", "Spirit Lantern", E::Spirit, 80, 20, 110.0, B::HoverShoot),
    enemy("ancestor_totem", "Ancestor Totem", E::Spirit, 115, 22, 0.0, B::StationaryShoot),
    // Void
    enemy("null_crawler", "Null Crawler", E::Void, 100, 21, 75.0, B::Patrol),
    enemy("rift_hunter", "Rift Hunter", E::Void, 110, 24, 160.0, B::Chase),
    enemy("abyss_eye", "Abyss Eye", E::Void, 90, 21, 125.0, B::FlyShoot),
    enemy("singularity", "Singularity", E::Void, 130, 23, 0.0, B::StationaryShoot),
];

/// Все типы врагов стихии (порядок каталога)
pub fn enemies_for(element: Element) -> impl Iterator<Item = &'static EnemyType> {
    ENEMY_TYPES.iter().filter(move |t| t.element == element)
}
