//! Abilities, their instant effects, and per-entity loadout slots.
//!
//! # Design
//!
//! - **Ability**: immutable definition, shared via `Arc` by every entity
//!   that uses it. Never mutated after construction.
//! - **AbilitySlot**: one entity's binding of an ability to a priority rank
//!   and an initial delay.
//! - **Effect**: closed set of instant effects, resolved by an exhaustive
//!   match in the engine.

use std::sync::Arc;

use crate::status::{Buff, Debuff};

/// Instant effects applied when an ability is used.
///
/// "Friendly" is {boss} when the boss acts and {all allies} otherwise.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Effect {
    /// +1 duration on every buff of every friendly entity.
    IncreaseBuffDuration,
    /// −1 duration on every debuff of every friendly entity.
    DecreaseDebuffDuration,
    /// Clears the single debuff of every friendly entity.
    #[strum(serialize = "remove_1_debuff")]
    #[cfg_attr(feature = "serde", serde(rename = "remove_1_debuff"))]
    RemoveOneDebuff,
    RemoveAllDebuffs,
    #[strum(serialize = "turn_meter_boost_5_self")]
    #[cfg_attr(feature = "serde", serde(rename = "turn_meter_boost_5_self"))]
    TurnMeterBoost5Self,
    #[strum(serialize = "turn_meter_boost_10_self")]
    #[cfg_attr(feature = "serde", serde(rename = "turn_meter_boost_10_self"))]
    TurnMeterBoost10Self,
    #[strum(serialize = "turn_meter_boost_15")]
    #[cfg_attr(feature = "serde", serde(rename = "turn_meter_boost_15"))]
    TurnMeterBoost15,
    #[strum(serialize = "turn_meter_boost_20")]
    #[cfg_attr(feature = "serde", serde(rename = "turn_meter_boost_20"))]
    TurnMeterBoost20,
    #[strum(serialize = "turn_meter_boost_30")]
    #[cfg_attr(feature = "serde", serde(rename = "turn_meter_boost_30"))]
    TurnMeterBoost30,
    /// The actor acts again before any natural turn-meter accrual.
    ExtraTurnSelf,
    /// −2 on every cooldown of every other friendly entity.
    #[strum(serialize = "reduce_cooldown_2_turns")]
    #[cfg_attr(feature = "serde", serde(rename = "reduce_cooldown_2_turns"))]
    ReduceCooldown2Turns,
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    /// Owner turns the ability stays unusable after use.
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub buffs: Vec<Buff>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub debuffs: Vec<Debuff>,
}

impl Ability {
    /// Creates an ability with no effects or grants.
    pub fn new(name: impl Into<String>, cooldown: u32) -> Self {
        Self {
            name: name.into(),
            cooldown,
            effects: Vec::new(),
            buffs: Vec::new(),
            debuffs: Vec::new(),
        }
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects = effects.into_iter().collect();
        self
    }

    pub fn with_buffs(mut self, buffs: impl IntoIterator<Item = Buff>) -> Self {
        self.buffs = buffs.into_iter().collect();
        self
    }

    pub fn with_debuffs(mut self, debuffs: impl IntoIterator<Item = Debuff>) -> Self {
        self.debuffs = debuffs.into_iter().collect();
        self
    }

    /// Freezes the definition for sharing across entities.
    pub fn shared(self) -> Arc<Ability> {
        Arc::new(self)
    }
}

/// An ability bound to one entity's priority rank and initial delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilitySlot {
    pub ability: Arc<Ability>,
    /// Higher is preferred. Unique within a loadout.
    pub priority: u32,
    /// Owner turns before the slot first becomes eligible.
    pub delay: u32,
}

impl AbilitySlot {
    pub fn new(ability: Arc<Ability>, priority: u32, delay: u32) -> Self {
        Self {
            ability,
            priority,
            delay,
        }
    }
}
