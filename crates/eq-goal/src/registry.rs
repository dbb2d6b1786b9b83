// registry.rs - GoalRegistry: ordered goals plus the running points total.
//
// The total is an independent counter: it grows by whatever each recorded
// event earned and is never recomputed from goal state. A registry is the
// unit of persistence; loading builds a fresh one and swaps it in whole.

use crate::error::LedgerError;
use crate::goal::Goal;

/// In-memory collection of goals, in creation/load order, plus the
/// cumulative points earned across all recorded events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalRegistry {
    goals: Vec<Goal>,
    total_points: u64,
}

impl GoalRegistry {
    /// Create an empty registry with a zero total.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with a restored total and no goals.
    pub(crate) fn with_total(total_points: u64) -> Self {
        Self {
            goals: Vec::new(),
            total_points,
        }
    }

    /// Append a goal. Does not touch the points total.
    pub fn add(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Goals paired with their 1-based listing index.
    ///
    /// An empty iterator means "no goals", which is not an error.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Goal)> + '_ {
        self.goals.iter().enumerate().map(|(i, g)| (i + 1, g))
    }

    /// The goal at a 1-based listing index.
    pub fn get(&self, index: usize) -> Result<&Goal, LedgerError> {
        let slot = self.slot(index)?;
        Ok(&self.goals[slot])
    }

    /// Record one event against the goal at a 1-based listing index, add
    /// what it earned to the total, and return the points earned.
    ///
    /// An out-of-range index leaves the total and every goal untouched.
    pub fn record_event_at(&mut self, index: usize) -> Result<u32, LedgerError> {
        let slot = self.slot(index)?;
        let earned = self.goals[slot].record_event();
        self.total_points = self.total_points.saturating_add(u64::from(earned));
        Ok(earned)
    }

    /// Remove every goal. The total is left alone.
    pub fn clear(&mut self) {
        self.goals.clear();
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    fn slot(&self, index: usize) -> Result<usize, LedgerError> {
        if index == 0 || index > self.goals.len() {
            return Err(LedgerError::OutOfRange {
                index,
                len: self.goals.len(),
            });
        }
        Ok(index - 1)
    }
}
