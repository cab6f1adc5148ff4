//! Ability selection and effect resolution for a single action.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::ability::{Ability, Effect};
use crate::config::SimConfig;
use crate::entity::{EntityId, EntityState, Registry};
use crate::error::SimError;
use crate::status::BuffScope;

/// What one resolved action did.
#[derive(Clone, Debug)]
pub struct ActionReport {
    /// Loadout slot used, or `None` when nothing was eligible.
    pub slot: Option<usize>,
    pub ability: Option<Arc<Ability>>,
    /// Raised by `ExtraTurnSelf`; suppresses this tick's meter accrual.
    pub extra_turn: bool,
}

/// Highest-priority slot that is off cooldown and past its initial delay.
pub fn select_slot(state: &EntityState) -> Option<usize> {
    state
        .config
        .slots
        .iter()
        .enumerate()
        .filter(|(index, _)| state.cooldowns[*index] == 0 && state.delays[*index] == 0)
        .min_by_key(|(_, slot)| Reverse(slot.priority))
        .map(|(index, _)| index)
}

/// Resolves the actor's action after its turn has been consumed.
pub fn resolve_action(
    registry: &mut Registry,
    actor: EntityId,
) -> Result<ActionReport, SimError> {
    let slot = select_slot(registry.get(actor));
    let ability =
        slot.map(|index| Arc::clone(&registry.get(actor).config.slots[index].ability));

    let state = registry.get_mut(actor);
    if let (Some(index), Some(ability)) = (slot, &ability) {
        state.cooldowns[index] = ability.cooldown;
    }
    state.advance_delays();

    let mut extra_turn = false;
    if let Some(ability) = &ability {
        for effect in &ability.effects {
            extra_turn |= apply_effect(registry, actor, *effect)?;
        }
    }

    let state = registry.get_mut(actor);
    state.buffs.shorten_all(1);
    state.debuffs.shorten_all(1);
    state.prune_statuses();

    if let Some(ability) = &ability {
        grant_statuses(registry, actor, ability);
    }

    Ok(ActionReport {
        slot,
        ability,
        extra_turn,
    })
}

/// Applies one instant effect. Returns true if it granted an extra turn.
fn apply_effect(
    registry: &mut Registry,
    actor: EntityId,
    effect: Effect,
) -> Result<bool, SimError> {
    let friendly = registry.friendly_ids(actor);

    match effect {
        Effect::IncreaseBuffDuration => {
            for id in friendly {
                let state = registry.get_mut(id);
                state.buffs.extend_all(1);
                state.prune_statuses();
            }
        }
        Effect::DecreaseDebuffDuration => {
            for id in friendly {
                let state = registry.get_mut(id);
                state.debuffs.shorten_all(1);
                state.prune_statuses();
            }
        }
        Effect::RemoveOneDebuff => {
            for id in friendly {
                let state = registry.get_mut(id);
                let count = state.debuffs.len();
                if count > 1 {
                    return Err(SimError::MultipleDebuffsOnRemoveOne { entity: id, count });
                }
                state.debuffs.clear();
            }
        }
        Effect::RemoveAllDebuffs => {
            for id in friendly {
                registry.get_mut(id).debuffs.clear();
            }
        }
        Effect::TurnMeterBoost5Self => registry.get_mut(actor).turn_meter += 5.0,
        Effect::TurnMeterBoost10Self => registry.get_mut(actor).turn_meter += 10.0,
        Effect::TurnMeterBoost15 => boost_meters(registry, &friendly, 15.0),
        Effect::TurnMeterBoost20 => boost_meters(registry, &friendly, 20.0),
        Effect::TurnMeterBoost30 => boost_meters(registry, &friendly, 30.0),
        Effect::ExtraTurnSelf => {
            registry.get_mut(actor).turn_meter = SimConfig::EXTRA_TURN_METER;
            return Ok(true);
        }
        Effect::ReduceCooldown2Turns => {
            for id in friendly.into_iter().filter(|id| *id != actor) {
                registry.get_mut(id).reduce_cooldowns(2);
            }
        }
    }

    Ok(false)
}

fn boost_meters(registry: &mut Registry, targets: &[EntityId], amount: f64) {
    for id in targets {
        registry.get_mut(*id).turn_meter += amount;
    }
}

/// Grants the ability's buff and debuff templates with max-merge.
fn grant_statuses(registry: &mut Registry, actor: EntityId, ability: &Ability) {
    let boss_acting = registry.is_boss(actor);

    for buff in &ability.buffs {
        let targets = match (boss_acting, buff.scope) {
            (true, _) | (false, BuffScope::SelfOnly) => vec![actor],
            (false, BuffScope::AllAllies) => registry.ally_ids().collect(),
        };
        for id in targets {
            registry.get_mut(id).buffs.grant(buff.kind, buff.duration);
        }
    }

    for debuff in &ability.debuffs {
        let targets = if boss_acting {
            registry.ally_ids().collect()
        } else {
            vec![actor]
        };
        for id in targets {
            registry.get_mut(id).debuffs.grant(debuff.kind, debuff.duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilitySlot;
    use crate::entity::EntityConfig;
    use crate::status::{Buff, BuffKind, Debuff, DebuffKind};

    fn basic() -> Arc<Ability> {
        Ability::new("a1", 1).shared()
    }

    fn ally(name: &str, slots: Vec<AbilitySlot>) -> EntityConfig {
        EntityConfig::new(name, 200.0, slots)
    }

    fn boss() -> EntityConfig {
        EntityConfig::new("boss", 190.0, vec![AbilitySlot::new(basic(), 1, 0)])
    }

    #[test]
    fn selects_highest_eligible_priority() {
        let skill = Ability::new("a2", 3).shared();
        let config = ally(
            "x",
            vec![AbilitySlot::new(basic(), 1, 0), AbilitySlot::new(skill, 2, 0)],
        );
        let mut registry = Registry::new(&[config], &boss());
        assert_eq!(select_slot(registry.get(EntityId(0))), Some(1));

        registry.get_mut(EntityId(0)).cooldowns[1] = 1;
        assert_eq!(select_slot(registry.get(EntityId(0))), Some(0));

        registry.get_mut(EntityId(0)).cooldowns[0] = 1;
        assert_eq!(select_slot(registry.get(EntityId(0))), None);
    }

    #[test]
    fn delayed_slot_waits_for_owner_turns() {
        let skill = Ability::new("a2", 3).shared();
        let config = ally(
            "x",
            vec![AbilitySlot::new(basic(), 1, 0), AbilitySlot::new(skill, 2, 1)],
        );
        let mut registry = Registry::new(&[config], &boss());

        let first = resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(first.slot, Some(0));
        assert_eq!(registry.get(EntityId(0)).delays, vec![0, 0]);

        // Basic attack is still on cooldown 1 until the next turn starts
        registry.get_mut(EntityId(0)).reduce_cooldowns(1);
        let second = resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(second.slot, Some(1));
        assert_eq!(registry.get(EntityId(0)).cooldowns[1], 3);
    }

    #[test]
    fn team_boost_reaches_every_ally_but_not_the_boss() {
        let skill = Ability::new("boost", 3)
            .with_effects([Effect::TurnMeterBoost30])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss());

        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(registry.get(EntityId(0)).turn_meter, 30.0);
        assert_eq!(registry.get(EntityId(1)).turn_meter, 30.0);
        assert_eq!(registry.boss().turn_meter, 0.0);
    }

    #[test]
    fn extra_turn_sets_meter_and_flag() {
        let skill = Ability::new("again", 4)
            .with_effects([Effect::ExtraTurnSelf])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config], &boss());

        let report = resolve_action(&mut registry, EntityId(0)).unwrap();
        assert!(report.extra_turn);
        assert_eq!(registry.get(EntityId(0)).turn_meter, SimConfig::EXTRA_TURN_METER);
    }

    #[test]
    fn cooldown_reduction_skips_the_actor() {
        let skill = Ability::new("reset", 4)
            .with_effects([Effect::ReduceCooldown2Turns])
            .shared();
        let actor = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let other = ally("y", vec![AbilitySlot::new(basic(), 1, 0)]);
        let mut registry = Registry::new(&[actor, other], &boss());
        registry.get_mut(EntityId(1)).cooldowns[0] = 3;

        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(registry.get(EntityId(0)).cooldowns, vec![4]);
        assert_eq!(registry.get(EntityId(1)).cooldowns, vec![1]);
    }

    #[test]
    fn own_statuses_tick_before_grants() {
        let skill = Ability::new("shield", 3)
            .with_buffs([Buff::new(BuffKind::BlockDamage, 1)])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss());

        resolve_action(&mut registry, EntityId(0)).unwrap();
        // The fresh grant is not shortened by the actor's own tick
        assert_eq!(registry.get(EntityId(0)).buffs.duration(BuffKind::BlockDamage), Some(1));
        assert_eq!(registry.get(EntityId(1)).buffs.duration(BuffKind::BlockDamage), Some(1));
    }

    #[test]
    fn self_scoped_buff_lands_on_the_actor_only() {
        let skill = Ability::new("haste", 4)
            .with_buffs([Buff::new(BuffKind::IncreaseSpeed30, 3).with_scope(BuffScope::SelfOnly)])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss());

        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert!(registry.get(EntityId(0)).has_buff(BuffKind::IncreaseSpeed30));
        assert!(!registry.get(EntityId(1)).has_buff(BuffKind::IncreaseSpeed30));
    }

    #[test]
    fn boss_debuffs_land_on_allies_and_buffs_on_itself() {
        let skill = Ability::new("curse", 1)
            .with_buffs([Buff::new(BuffKind::IncreaseSpeed30, 2)])
            .with_debuffs([Debuff::new(DebuffKind::DecreaseSpeed15, 2)])
            .shared();
        let boss = EntityConfig::new("boss", 190.0, vec![AbilitySlot::new(skill, 1, 0)]);
        let config = ally("x", vec![AbilitySlot::new(basic(), 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss);
        let boss_id = registry.boss_id();

        resolve_action(&mut registry, boss_id).unwrap();
        assert!(registry.boss().has_buff(BuffKind::IncreaseSpeed30));
        assert!(!registry.boss().has_debuff(DebuffKind::DecreaseSpeed15));
        for state in registry.allies() {
            assert_eq!(state.debuffs.duration(DebuffKind::DecreaseSpeed15), Some(2));
            assert!(!state.has_buff(BuffKind::IncreaseSpeed30));
        }
    }

    #[test]
    fn remove_one_debuff_clears_a_single_debuff() {
        let skill = Ability::new("cleanse", 3)
            .with_effects([Effect::RemoveOneDebuff])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config], &boss());

        registry
            .get_mut(EntityId(0))
            .debuffs
            .grant(DebuffKind::DecreaseSpeed15, 3);
        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert!(registry.get(EntityId(0)).debuffs.is_empty());
    }

    #[test]
    fn debuff_duration_reduction_prunes_expired_entries() {
        let skill = Ability::new("soothe", 3)
            .with_effects([Effect::DecreaseDebuffDuration])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss());
        registry
            .get_mut(EntityId(1))
            .debuffs
            .grant(DebuffKind::DecreaseSpeed15, 1);

        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert!(!registry.get(EntityId(1)).has_debuff(DebuffKind::DecreaseSpeed15));
    }

    #[test]
    fn buff_extension_applies_before_own_tick() {
        let skill = Ability::new("extend", 3)
            .with_effects([Effect::IncreaseBuffDuration])
            .shared();
        let config = ally("x", vec![AbilitySlot::new(skill, 1, 0)]);
        let mut registry = Registry::new(&[config.clone(), config], &boss());
        for id in [EntityId(0), EntityId(1)] {
            registry.get_mut(id).buffs.grant(BuffKind::BlockDamage, 1);
        }

        resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(registry.get(EntityId(0)).buffs.duration(BuffKind::BlockDamage), Some(1));
        assert_eq!(registry.get(EntityId(1)).buffs.duration(BuffKind::BlockDamage), Some(2));
    }

    #[test]
    fn no_eligible_slot_still_ticks_statuses_and_delays() {
        let config = ally(
            "x",
            vec![
                AbilitySlot::new(basic(), 1, 0),
                AbilitySlot::new(Ability::new("a2", 3).shared(), 2, 2),
            ],
        );
        let mut registry = Registry::new(&[config], &boss());
        let state = registry.get_mut(EntityId(0));
        state.cooldowns[0] = 1;
        state.buffs.grant(BuffKind::BlockDamage, 1);

        let report = resolve_action(&mut registry, EntityId(0)).unwrap();
        assert_eq!(report.slot, None);
        assert!(report.ability.is_none());
        let state = registry.get(EntityId(0));
        assert_eq!(state.delays, vec![0, 1]);
        assert!(state.buffs.is_empty());
    }
}
