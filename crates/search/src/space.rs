//! Candidate enumeration by mixed-radix index.
//!
//! The candidate space is the cross product of one config list per variable
//! character. Index `i` decodes to one pick per list, with the last list as
//! the fastest-moving digit, so increasing indices walk the product in the
//! same order as nested loops over the lists.

use sim_core::EntityConfig;

use crate::SearchError;

/// Fixed allies followed by one pick from each variable list.
#[derive(Clone, Debug)]
pub struct CandidateSpace {
    fixed: Vec<EntityConfig>,
    lists: Vec<Vec<EntityConfig>>,
    len: u64,
}

impl CandidateSpace {
    pub fn new(
        fixed: Vec<EntityConfig>,
        lists: Vec<Vec<EntityConfig>>,
    ) -> Result<Self, SearchError> {
        let len = lists.iter().try_fold(1u64, |acc, list| {
            acc.checked_mul(list.len() as u64)
                .ok_or(SearchError::SpaceTooLarge)
        })?;

        Ok(Self { fixed, lists, len })
    }

    /// Number of candidates. Zero if any list is empty.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decodes `index` into per-list positions.
    pub fn digits(&self, mut index: u64) -> Vec<usize> {
        let mut digits = vec![0; self.lists.len()];
        for (digit, list) in digits.iter_mut().zip(&self.lists).rev() {
            let radix = list.len() as u64;
            *digit = (index % radix) as usize;
            index /= radix;
        }
        digits
    }

    /// The roster for `index`, in roster order.
    pub fn team(&self, index: u64) -> Vec<EntityConfig> {
        let picks = self
            .digits(index)
            .into_iter()
            .zip(&self.lists)
            .map(|(digit, list)| list[digit].clone());

        self.fixed.iter().cloned().chain(picks).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::{Ability, AbilitySlot};

    fn config(name: &str, speed: f64) -> EntityConfig {
        EntityConfig::new(
            name,
            speed,
            vec![AbilitySlot::new(Ability::new("a1", 1).shared(), 1, 0)],
        )
    }

    fn speeds(name: &str, values: &[f64]) -> Vec<EntityConfig> {
        values.iter().map(|speed| config(name, *speed)).collect()
    }

    #[test]
    fn last_list_moves_fastest() {
        let space = CandidateSpace::new(
            vec![config("fixed", 200.0)],
            vec![speeds("x", &[1.0, 2.0]), speeds("y", &[10.0, 20.0, 30.0])],
        )
        .unwrap();

        assert_eq!(space.len(), 6);
        assert_eq!(space.digits(0), vec![0, 0]);
        assert_eq!(space.digits(1), vec![0, 1]);
        assert_eq!(space.digits(3), vec![1, 0]);
        assert_eq!(space.digits(5), vec![1, 2]);

        let team = space.team(4);
        let picked: Vec<f64> = team.iter().map(|c| c.speed).collect();
        assert_eq!(picked, vec![200.0, 2.0, 20.0]);
    }

    #[test]
    fn no_variable_lists_is_a_single_candidate() {
        let space = CandidateSpace::new(vec![config("fixed", 200.0)], Vec::new()).unwrap();
        assert_eq!(space.len(), 1);
        assert_eq!(space.team(0).len(), 1);
    }

    #[test]
    fn empty_list_empties_the_space() {
        let space =
            CandidateSpace::new(Vec::new(), vec![speeds("x", &[1.0]), Vec::new()]).unwrap();
        assert!(space.is_empty());
    }
}
