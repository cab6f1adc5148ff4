//! Entity configuration and per-run entity state.
//!
//! The registry keeps allies in their supplied roster order and the boss in
//! the last position. That enumeration order is the tie-break order of the
//! scheduler.

use std::fmt;

use crate::ability::AbilitySlot;
use crate::error::ConfigError;
use crate::status::{BuffKind, BuffLedger, DebuffKind, DebuffLedger};

/// Index of an entity in the registry of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub usize);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Limited-use passive that negates one otherwise fatal boss action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvertingPassive {
    /// Owner turns before the passive is ready again after triggering.
    pub cooldown: u32,
}

impl AvertingPassive {
    pub const DEFAULT_COOLDOWN: u32 = 4;
}

impl Default for AvertingPassive {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
        }
    }
}

/// Immutable configuration of one participant.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityConfig {
    pub name: String,
    pub speed: f64,
    pub slots: Vec<AbilitySlot>,
    pub passive: Option<AvertingPassive>,
}

impl EntityConfig {
    pub fn new(name: impl Into<String>, speed: f64, slots: Vec<AbilitySlot>) -> Self {
        Self {
            name: name.into(),
            speed,
            slots,
            passive: None,
        }
    }

    pub fn with_passive(mut self, passive: AvertingPassive) -> Self {
        self.passive = Some(passive);
        self
    }

    /// Returns a copy with a different base speed.
    pub fn with_speed(&self, speed: f64) -> Self {
        Self {
            speed,
            ..self.clone()
        }
    }

    /// Checks the loadout invariants.
    ///
    /// - speed is finite and not negative (at 0 an ally only moves on
    ///   meter boosts)
    /// - the loadout is not empty
    /// - the first slot has delay 0
    /// - priorities are a permutation of `1..=N`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed {
                entity: self.name.clone(),
                speed: self.speed,
            });
        }

        let first = self.slots.first().ok_or_else(|| ConfigError::EmptyLoadout {
            entity: self.name.clone(),
        })?;

        if first.delay != 0 {
            return Err(ConfigError::FirstSlotDelayed {
                entity: self.name.clone(),
                delay: first.delay,
            });
        }

        let len = self.slots.len();
        let mut seen = vec![false; len];
        for slot in &self.slots {
            let rank = slot.priority as usize;
            if rank == 0 || rank > len || seen[rank - 1] {
                return Err(ConfigError::InvalidPriorities {
                    entity: self.name.clone(),
                    priorities: self.slots.iter().map(|s| s.priority).collect(),
                    len,
                });
            }
            seen[rank - 1] = true;
        }

        Ok(())
    }
}

impl fmt::Display for EntityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abilities: Vec<&str> = self.slots.iter().map(|s| s.ability.name.as_str()).collect();
        let priorities: Vec<u32> = self.slots.iter().map(|s| s.priority).collect();
        let delays: Vec<u32> = self.slots.iter().map(|s| s.delay).collect();
        write!(
            f,
            "{}: speed={}, abilities={:?}, priorities={:?}, delays={:?}",
            self.name, self.speed, abilities, priorities, delays
        )
    }
}

/// Runtime state of one entity for the lifetime of one run.
#[derive(Clone, Debug)]
pub struct EntityState {
    pub id: EntityId,
    pub config: EntityConfig,
    pub turn_meter: f64,
    /// Remaining cooldown per slot.
    pub cooldowns: Vec<u32>,
    /// Remaining initial delay per slot. Only ever decremented.
    pub delays: Vec<u32>,
    pub buffs: BuffLedger,
    pub debuffs: DebuffLedger,
    /// Averting passive cooldown (0 = ready). Unused without a passive.
    pub passive_cooldown: u32,
}

impl EntityState {
    /// Creates the initial state for a config.
    pub fn new(id: EntityId, config: EntityConfig) -> Self {
        let cooldowns = vec![0; config.slots.len()];
        let delays = config.slots.iter().map(|slot| slot.delay).collect();

        Self {
            id,
            config,
            turn_meter: 0.0,
            cooldowns,
            delays,
            buffs: BuffLedger::empty(),
            debuffs: DebuffLedger::empty(),
            passive_cooldown: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.has(kind)
    }

    pub fn has_debuff(&self, kind: DebuffKind) -> bool {
        self.debuffs.has(kind)
    }

    /// Decrements every slot cooldown by `turns`, flooring at zero.
    pub fn reduce_cooldowns(&mut self, turns: u32) {
        for cooldown in &mut self.cooldowns {
            *cooldown = cooldown.saturating_sub(turns);
        }
    }

    /// Decrements every remaining initial delay by one, flooring at zero.
    pub fn advance_delays(&mut self) {
        for delay in &mut self.delays {
            *delay = delay.saturating_sub(1);
        }
    }

    /// Drops expired buffs and debuffs.
    pub fn prune_statuses(&mut self) {
        self.buffs.prune();
        self.debuffs.prune();
    }

    /// True if this entity's averting passive exists and is off cooldown.
    pub fn passive_ready(&self) -> bool {
        self.config.passive.is_some() && self.passive_cooldown == 0
    }
}

/// All entities of one run: allies in roster order, then the boss.
#[derive(Clone, Debug)]
pub struct Registry {
    entities: Vec<EntityState>,
}

impl Registry {
    /// Builds fresh runtime states from the supplied configs.
    pub fn new(allies: &[EntityConfig], boss: &EntityConfig) -> Self {
        let entities = allies
            .iter()
            .chain(std::iter::once(boss))
            .enumerate()
            .map(|(index, config)| EntityState::new(EntityId(index), config.clone()))
            .collect();

        Self { entities }
    }

    pub fn boss_id(&self) -> EntityId {
        EntityId(self.entities.len() - 1)
    }

    pub fn is_boss(&self, id: EntityId) -> bool {
        id == self.boss_id()
    }

    pub fn ally_count(&self) -> usize {
        self.entities.len() - 1
    }

    pub fn get(&self, id: EntityId) -> &EntityState {
        &self.entities[id.0]
    }

    pub fn get_mut(&mut self, id: EntityId) -> &mut EntityState {
        &mut self.entities[id.0]
    }

    pub fn boss(&self) -> &EntityState {
        self.get(self.boss_id())
    }

    /// Allies in roster order.
    pub fn allies(&self) -> &[EntityState] {
        &self.entities[..self.ally_count()]
    }

    pub fn allies_mut(&mut self) -> &mut [EntityState] {
        let count = self.ally_count();
        &mut self.entities[..count]
    }

    pub fn ally_ids(&self) -> impl Iterator<Item = EntityId> {
        (0..self.ally_count()).map(EntityId)
    }

    /// Every entity in tie-break order (allies first, boss last).
    pub fn iter(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EntityState> {
        self.entities.iter_mut()
    }

    /// The entities on the acting entity's side.
    pub fn friendly_ids(&self, actor: EntityId) -> Vec<EntityId> {
        if self.is_boss(actor) {
            vec![self.boss_id()]
        } else {
            self.ally_ids().collect()
        }
    }
}
