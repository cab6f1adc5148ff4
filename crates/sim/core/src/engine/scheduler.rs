//! Turn-meter accrual and actor selection.

use crate::config::SimConfig;
use crate::entity::{EntityId, EntityState, Registry};
use crate::status::{BuffKind, DebuffKind};

/// Speed after status modifiers. Both modifiers stack multiplicatively.
pub fn effective_speed(state: &EntityState) -> f64 {
    let mut speed = state.config.speed;
    if state.has_buff(BuffKind::IncreaseSpeed30) {
        speed *= SimConfig::SPEED_INCREASE_MULTIPLIER;
    }
    if state.has_debuff(DebuffKind::DecreaseSpeed15) {
        speed *= SimConfig::SPEED_DECREASE_MULTIPLIER;
    }
    speed
}

/// Picks the entity that acts this tick, if any.
///
/// Among entities at or above the threshold the strictly greatest meter wins.
/// Ties go to the earliest entity in registry order.
pub fn select_actor(registry: &Registry) -> Option<EntityId> {
    let mut best: Option<(EntityId, f64)> = None;

    for entity in registry.iter() {
        if entity.turn_meter < SimConfig::TURN_METER_THRESHOLD {
            continue;
        }
        if best.is_none_or(|(_, meter)| entity.turn_meter > meter) {
            best = Some((entity.id, entity.turn_meter));
        }
    }

    best.map(|(id, _)| id)
}

/// Consumes the actor's turn: meter reset, slot cooldowns and passive
/// cooldown tick down by one.
pub fn begin_turn(state: &mut EntityState) {
    state.turn_meter = 0.0;
    state.reduce_cooldowns(1);
    state.passive_cooldown = state.passive_cooldown.saturating_sub(1);
}

/// Adds `effective_speed * TICK_MULTIPLIER` to every meter.
pub fn advance_turn_meters(registry: &mut Registry) {
    for entity in registry.iter_mut() {
        entity.turn_meter += effective_speed(entity) * SimConfig::TURN_METER_TICK_MULTIPLIER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{Ability, AbilitySlot};
    use crate::entity::EntityConfig;

    fn config(name: &str, speed: f64) -> EntityConfig {
        EntityConfig::new(
            name,
            speed,
            vec![AbilitySlot::new(Ability::new("a1", 1).shared(), 1, 0)],
        )
    }

    fn registry() -> Registry {
        Registry::new(&[config("a", 200.0), config("b", 180.0)], &config("boss", 190.0))
    }

    #[test]
    fn nobody_acts_below_threshold() {
        let mut registry = registry();
        registry.get_mut(EntityId(0)).turn_meter = 99.9;
        assert_eq!(select_actor(&registry), None);
    }

    #[test]
    fn highest_meter_acts() {
        let mut registry = registry();
        registry.get_mut(EntityId(0)).turn_meter = 100.0;
        registry.get_mut(EntityId(2)).turn_meter = 130.0;
        assert_eq!(select_actor(&registry), Some(EntityId(2)));
    }

    #[test]
    fn ties_go_to_the_earliest_entity() {
        let mut registry = registry();
        registry.get_mut(EntityId(1)).turn_meter = 120.0;
        registry.get_mut(EntityId(2)).turn_meter = 120.0;
        assert_eq!(select_actor(&registry), Some(EntityId(1)));
    }

    #[test]
    fn speed_modifiers_stack() {
        let mut registry = registry();
        let state = registry.get_mut(EntityId(0));
        assert_eq!(effective_speed(state), 200.0);

        state.buffs.grant(BuffKind::IncreaseSpeed30, 1);
        state.debuffs.grant(DebuffKind::DecreaseSpeed15, 1);
        let expected = 200.0 * 1.3 * 0.85;
        assert!((effective_speed(state) - expected).abs() < 1e-9);
    }

    #[test]
    fn tick_accrues_seven_percent_of_speed() {
        let mut registry = registry();
        advance_turn_meters(&mut registry);
        assert!((registry.get(EntityId(0)).turn_meter - 14.0).abs() < 1e-9);
        assert!((registry.boss().turn_meter - 13.3).abs() < 1e-9);
    }

    #[test]
    fn begin_turn_resets_meter_and_ticks_cooldowns() {
        let mut registry = registry();
        let state = registry.get_mut(EntityId(0));
        state.turn_meter = 150.0;
        state.cooldowns[0] = 2;
        state.passive_cooldown = 1;

        begin_turn(state);
        assert_eq!(state.turn_meter, 0.0);
        assert_eq!(state.cooldowns, vec![1]);
        assert_eq!(state.passive_cooldown, 0);

        begin_turn(state);
        assert_eq!(state.cooldowns, vec![0]);
        assert_eq!(state.passive_cooldown, 0);
    }
}
