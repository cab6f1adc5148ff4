//! Search results and the partial tallies they are reduced from.

use std::fmt;

use sim_core::{EntityConfig, SimError};

/// A roster that survived the whole budget.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Candidate index in the search space.
    pub index: u64,
    pub team: Vec<EntityConfig>,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "candidate #{}", self.index)?;
        for member in &self.team {
            write!(f, "\n\t{member}")?;
        }
        Ok(())
    }
}

/// Outcome of a full search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
    pub budget: u32,
    pub evaluated: u64,
    /// Highest boss-action count reached by any candidate (0 if none ran).
    pub best_turns: u32,
    /// Lowest-index candidate reaching `best_turns`.
    pub best: Option<Solution>,
    /// Every candidate that reached the budget, by index.
    pub solutions: Vec<Solution>,
}

impl SearchReport {
    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }
}

/// Order-independent accumulator used by the parallel reduction.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub evaluated: u64,
    /// (turns, index) of the best candidate so far.
    pub best: Option<(u32, u64)>,
    pub solutions: Vec<u64>,
    /// Lowest-index failure, if any.
    pub error: Option<(u64, SimError)>,
}

impl Tally {
    pub fn record(mut self, index: u64, result: Result<u32, SimError>, budget: u32) -> Self {
        self.evaluated += 1;
        match result {
            Ok(turns) => {
                if turns == budget {
                    self.solutions.push(index);
                }
                self.best = Some(match self.best {
                    Some(best) => prefer(best, (turns, index)),
                    None => (turns, index),
                });
            }
            Err(error) => {
                if self.error.as_ref().is_none_or(|(first, _)| index < *first) {
                    self.error = Some((index, error));
                }
            }
        }
        self
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.evaluated += other.evaluated;
        self.best = match (self.best, other.best) {
            (Some(a), Some(b)) => Some(prefer(a, b)),
            (a, b) => a.or(b),
        };
        self.solutions.extend(other.solutions);
        if let Some((index, error)) = other.error {
            if self.error.as_ref().is_none_or(|(first, _)| index < *first) {
                self.error = Some((index, error));
            }
        }
        self
    }
}

/// More turns wins; ties go to the lower index.
fn prefer(a: (u32, u64), b: (u32, u64)) -> (u32, u64) {
    if b.0 > a.0 || (b.0 == a.0 && b.1 < a.1) {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::EntityId;

    fn halves() -> (Tally, Tally) {
        let left = Tally::default().record(4, Ok(10), 50).record(7, Ok(50), 50);
        let right = Tally::default().record(2, Ok(50), 50).record(3, Ok(10), 50);
        (left, right)
    }

    #[test]
    fn merge_is_order_independent() {
        let (left, right) = halves();
        let a = left.merge(right);
        let (left, right) = halves();
        let b = right.merge(left);

        assert_eq!(a.best, Some((50, 2)));
        assert_eq!(b.best, Some((50, 2)));
        assert_eq!(a.evaluated, 4);

        let mut sa = a.solutions;
        let mut sb = b.solutions;
        sa.sort_unstable();
        sb.sort_unstable();
        assert_eq!(sa, vec![2, 7]);
        assert_eq!(sa, sb);
    }

    fn looped(turns: u32) -> SimError {
        SimError::ExtraTurnLoop {
            entity: EntityId(0),
            turns,
        }
    }

    #[test]
    fn lowest_index_error_wins() {
        let tally = Tally::default()
            .record(9, Err(looped(1)), 50)
            .merge(Tally::default().record(3, Err(looped(2)), 50));
        assert_eq!(tally.error, Some((3, looped(2))));
    }
}
