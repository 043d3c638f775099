//! Герой: компонент, баффы, gift power
//!
//! Хост управляет героем только через `InputState` (см. `input.rs`).
//! Урон герою идёт через `Hero::receive_damage`: щит/гифт → i-frames → Combatant.

use bevy::prelude::*;

use crate::catalog::Element;
use crate::components::{Combatant, DamageOutcome};
use crate::physics::Kinematic;

pub const HERO_HEALTH: u32 = 100;
pub const HERO_DAMAGE: u32 = 20;
pub const HERO_SPEED: f32 = 200.0;
pub const HERO_JUMP_VELOCITY: f32 = 520.0;
pub const HERO_RADIUS: f32 = 16.0;
/// Пауза между базовыми выстрелами
pub const POWER_COOLDOWN_MS: f32 = 350.0;
/// i-frames после полученного урона
pub const HURT_IFRAMES_MS: f32 = 1000.0;

pub const BUFF_DURATION_MS: f32 = 10_000.0;
pub const SPEED_BOOST_MULTIPLIER: f32 = 1.5;
pub const GIFT_DURATION_MS: f32 = 5000.0;
pub const TEMPEST_SPEED_MULTIPLIER: f32 = 1.75;

/// Герой игрока
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Combatant, Kinematic, Buffs, GiftPower)]
pub struct Hero {
    pub element: Element,
    pub speed: f32,
    pub jump_velocity: f32,
    /// Осталось до следующего базового выстрела
    pub power_cooldown_ms: f32,
    /// Осталось i-frames
    pub hurt_timer_ms: f32,
    pub facing_left: bool,
}

impl Hero {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            speed: HERO_SPEED,
            jump_velocity: HERO_JUMP_VELOCITY,
            power_cooldown_ms: 0.0,
            hurt_timer_ms: 0.0,
            facing_left: false,
        }
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt_timer_ms > 0.0
    }

    /// Урон герою с учётом щита, гифта и i-frames
    pub fn receive_damage(
        &mut self,
        buffs: &Buffs,
        gift: &GiftPower,
        combatant: &mut Combatant,
        amount: u32,
    ) -> DamageOutcome {
        if combatant.is_dead {
            return DamageOutcome::Ignored;
        }
        if buffs.has_shield() || gift.blocks_damage() {
            return DamageOutcome::Absorbed;
        }
        if self.is_hurt() {
            return DamageOutcome::Ignored;
        }

        let outcome = combatant.take_damage(amount);
        if let DamageOutcome::Wounded { .. } = outcome {
            self.hurt_timer_ms = HURT_IFRAMES_MS;
        }
        outcome
    }

    pub fn move_speed(&self, buffs: &Buffs, gift: &GiftPower) -> f32 {
        let mut speed = self.speed;
        if buffs.has_speed_boost() {
            speed *= SPEED_BOOST_MULTIPLIER;
        }
        if gift.is_active(GiftKind::Tempest) {
            speed *= TEMPEST_SPEED_MULTIPLIER;
        }
        speed
    }

    pub fn tick(&mut self, delta_ms: f32) {
        self.power_cooldown_ms = (self.power_cooldown_ms - delta_ms).max(0.0);
        self.hurt_timer_ms = (self.hurt_timer_ms - delta_ms).max(0.0);
    }
}

/// Баффы героя, у каждого свой независимый таймер
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Buffs {
    pub shield_ms: f32,
    pub speed_boost_ms: f32,
    pub double_damage_ms: f32,
    pub multi_shot_ms: f32,
}

impl Buffs {
    pub fn has_shield(&self) -> bool {
        self.shield_ms > 0.0
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost_ms > 0.0
    }

    pub fn has_double_damage(&self) -> bool {
        self.double_damage_ms > 0.0
    }

    pub fn has_multi_shot(&self) -> bool {
        self.multi_shot_ms > 0.0
    }

    pub fn tick(&mut self, delta_ms: f32) {
        for timer in [
            &mut self.shield_ms,
            &mut self.speed_boost_ms,
            &mut self.double_damage_ms,
            &mut self.multi_shot_ms,
        ] {
            *timer = (*timer - delta_ms).max(0.0);
        }
    }
}

/// Gift power: активная способность стихии героя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GiftKind {
    /// Полная защита от урона
    Bulwark,
    /// Ускорение
    Tempest,
    /// Кольцо снарядов при активации
    Inferno,
    /// Тройной выстрел и быстрый кулдаун
    Barrage,
}

impl GiftKind {
    pub fn for_element(element: Element) -> GiftKind {
        match element {
            Element::Earth | Element::Metal | Element::Crystal | Element::Ice | Element::Sand => GiftKind::Bulwark,
            Element::Air | Element::Lightning | Element::Storm | Element::Spirit => GiftKind::Tempest,
            Element::Fire | Element::Magma | Element::Light => GiftKind::Inferno,
            Element::Water | Element::Nature | Element::Poison | Element::Shadow | Element::Void => GiftKind::Barrage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ActiveGift {
    pub kind: GiftKind,
    pub remaining_ms: f32,
}

/// Не больше одного активного гифта
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GiftPower {
    pub active: Option<ActiveGift>,
}

impl GiftPower {
    /// Активация. false = отклонено (уже есть активный гифт).
    pub fn try_activate(&mut self, kind: GiftKind) -> bool {
        if self.active.is_some() {
            return false;
        }

        self.active = Some(ActiveGift {
            kind,
            remaining_ms: GIFT_DURATION_MS,
        });
        true
    }

    pub fn is_active(&self, kind: GiftKind) -> bool {
        self.active.is_some_and(|gift| gift.kind == kind)
    }

    pub fn blocks_damage(&self) -> bool {
        self.is_active(GiftKind::Bulwark)
    }

    /// Тик. Возвращает истёкший гифт.
    pub fn tick(&mut self, delta_ms: f32) -> Option<GiftKind> {
        let gift = self.active.as_mut()?;
        gift.remaining_ms -= delta_ms;

        if gift.remaining_ms <= 0.0 {
            let kind = gift.kind;
            self.active = None;
            Some(kind)
        } else {
            None
        }
    }
}
