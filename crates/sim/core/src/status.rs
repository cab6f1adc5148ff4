//! Buffs, debuffs and the per-entity ledgers that track them.
//!
//! # Duration bookkeeping
//!
//! A duration counts the owner's remaining actions. It is decremented once
//! per action the owner takes (and by explicit effects), and an entry is
//! pruned as soon as its duration reaches zero.
//!
//! # Stacking
//!
//! Granting a kind that is already active never adds a second instance.
//! The existing entry keeps the larger of the two durations.

use arrayvec::ArrayVec;

use crate::config::SimConfig;

/// Positive status kinds.
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
pub enum BuffKind {
    /// Effective speed ×1.3 while active.
    #[strum(serialize = "increase_speed_30")]
    #[cfg_attr(feature = "serde", serde(rename = "increase_speed_30"))]
    IncreaseSpeed30,
    /// Absorbs the boss's attack; every ally needs one to avoid enrage.
    BlockDamage,
}

/// Negative status kinds.
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
pub enum DebuffKind {
    /// Effective speed ×0.85 while active.
    #[strum(serialize = "decrease_speed_15")]
    #[cfg_attr(feature = "serde", serde(rename = "decrease_speed_15"))]
    DecreaseSpeed15,
}

/// Who receives a buff granted by an ally's ability.
///
/// Boss-granted buffs always land on the boss itself.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum BuffScope {
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    #[default]
    #[strum(serialize = "all")]
    #[cfg_attr(feature = "serde", serde(rename = "all"))]
    AllAllies,
}

/// Buff template carried by an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub kind: BuffKind,
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scope: BuffScope,
}

impl Buff {
    /// Creates a buff template that targets all allies.
    pub const fn new(kind: BuffKind, duration: u32) -> Self {
        Self {
            kind,
            duration,
            scope: BuffScope::AllAllies,
        }
    }

    pub const fn with_scope(mut self, scope: BuffScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Debuff template carried by an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuff {
    pub kind: DebuffKind,
    pub duration: u32,
}

impl Debuff {
    pub const fn new(kind: DebuffKind, duration: u32) -> Self {
        Self { kind, duration }
    }
}

/// A single active status with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus<K> {
    pub kind: K,
    pub duration: u32,
}

/// Active statuses of one polarity on one entity.
///
/// Holds at most one entry per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLedger<K> {
    entries: ArrayVec<ActiveStatus<K>, { SimConfig::MAX_STATUS_EFFECTS }>,
}

pub type BuffLedger = StatusLedger<BuffKind>;
pub type DebuffLedger = StatusLedger<DebuffKind>;

impl<K> Default for StatusLedger<K> {
    fn default() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }
}

impl<K: Copy + PartialEq> StatusLedger<K> {
    /// Creates an empty ledger.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Grants a status, merging with an existing entry of the same kind.
    ///
    /// The merged duration is `max(current, duration)`; durations never add up.
    pub fn grant(&mut self, kind: K, duration: u32) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == kind) {
            existing.duration = existing.duration.max(duration);
            return;
        }

        if !self.entries.is_full() {
            self.entries.push(ActiveStatus { kind, duration });
        }
    }

    pub fn has(&self, kind: K) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Remaining duration of a kind, or `None` if it is not active.
    pub fn duration(&self, kind: K) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.duration)
    }

    /// Adds `turns` to every entry.
    pub fn extend_all(&mut self, turns: u32) {
        for entry in &mut self.entries {
            entry.duration = entry.duration.saturating_add(turns);
        }
    }

    /// Subtracts `turns` from every entry, flooring at zero.
    ///
    /// Entries are not removed; call [`prune`](Self::prune) afterwards.
    pub fn shorten_all(&mut self, turns: u32) {
        for entry in &mut self.entries {
            entry.duration = entry.duration.saturating_sub(turns);
        }
    }

    /// Removes every entry whose duration reached zero.
    pub fn prune(&mut self) {
        self.entries.retain(|e| e.duration > 0);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus<K>> {
        self.entries.iter()
    }
}
