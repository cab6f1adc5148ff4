//! Enumerates every ability policy a character can be given.
//!
//! For a character with `N` abilities the policies are the cross product of
//! - each speed in the requested range,
//! - each priority order with slot 0 pinned to priority 1,
//! - each binary delay vector with slot 0 pinned to delay 0,
//!
//! giving `speeds × (N-1)! × 2^(N-1)` configs, iterated speed-major.

use std::ops::Range;

use sim_core::{ConfigError, EntityConfig};

use crate::catalog::Character;

/// Priority vectors `(1, p_2, ..., p_N)` where `p_2..p_N` runs over the
/// permutations of `2..=N` in lexicographic order.
pub fn priority_orders(abilities: usize) -> Vec<Vec<u32>> {
    let rest: Vec<u32> = (2..=abilities as u32).collect();
    let mut orders = Vec::new();
    permute(&rest, &mut vec![1], &mut vec![false; rest.len()], &mut orders);
    orders
}

fn permute(items: &[u32], current: &mut Vec<u32>, used: &mut [bool], out: &mut Vec<Vec<u32>>) {
    if current.len() == items.len() + 1 {
        out.push(current.clone());
        return;
    }
    for index in 0..items.len() {
        if used[index] {
            continue;
        }
        used[index] = true;
        current.push(items[index]);
        permute(items, current, used, out);
        current.pop();
        used[index] = false;
    }
}

/// Delay vectors `(0, d_2, ..., d_N)` with each `d_i` in `{0, 1}`, counting
/// up in binary with the last slot as the least significant digit.
pub fn delay_vectors(abilities: usize) -> Vec<Vec<u32>> {
    let free = abilities.saturating_sub(1);
    (0..1u32 << free)
        .map(|bits| {
            std::iter::once(0)
                .chain((0..free).rev().map(|shift| (bits >> shift) & 1))
                .collect()
        })
        .collect()
}

/// Every config for `character` across `speeds`.
///
/// Fails on the first invalid config, e.g. a character with no abilities.
pub fn character_configs(
    character: &Character,
    speeds: Range<u32>,
) -> Result<Vec<EntityConfig>, ConfigError> {
    let count = character.ability_count();
    let priorities = priority_orders(count);
    let delays = delay_vectors(count);

    let mut configs = Vec::with_capacity(speeds.len() * priorities.len() * delays.len());
    for speed in speeds {
        for priority in &priorities {
            for delay in delays.iter().map(Vec::as_slice) {
                let config = character.to_config(f64::from(speed), priority, Some(delay))?;
                configs.push(config);
            }
        }
    }

    tracing::debug!(
        character = %character.name,
        configs = configs.len(),
        "generated character configs"
    );
    Ok(configs)
}
