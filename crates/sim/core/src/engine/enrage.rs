//! Boss enrage check, evaluated after every boss action.

use crate::entity::{EntityId, Registry};
use crate::status::BuffKind;

/// Outcome of the enrage check for one boss action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EnrageVerdict {
    /// Every ally was shielded.
    Continuing,
    /// An ally's passive negated the designated boss ability.
    Averted { by: EntityId },
    /// Terminal: the roster did not survive this boss action.
    Failed,
}

impl EnrageVerdict {
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Evaluates the boss action that used `used_slot` (`None` if no ability
/// was eligible). An averting ally has its passive cooldown restarted.
pub fn evaluate(
    registry: &mut Registry,
    used_slot: Option<usize>,
    averting_slot: usize,
) -> EnrageVerdict {
    if registry
        .allies()
        .iter()
        .all(|ally| ally.has_buff(BuffKind::BlockDamage))
    {
        return EnrageVerdict::Continuing;
    }

    if used_slot != Some(averting_slot) {
        return EnrageVerdict::Failed;
    }

    let Some(guardian) = registry
        .allies()
        .iter()
        .find(|ally| ally.passive_ready())
        .map(|ally| ally.id)
    else {
        return EnrageVerdict::Failed;
    };

    let state = registry.get_mut(guardian);
    state.passive_cooldown = state.config.passive.map_or(0, |passive| passive.cooldown);

    EnrageVerdict::Averted { by: guardian }
}
