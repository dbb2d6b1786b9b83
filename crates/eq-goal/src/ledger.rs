// ledger.rs - Ledger: the controller that owns the goal registry.
//
// The CLI shell talks only to this type. It validates new goals, routes
// events to the registry, and moves the registry to and from ledger files.
// Loading parses into a fresh registry first and swaps it in only when the
// whole file decoded, so a failed load leaves the current ledger untouched.

use std::path::Path;

use crate::codec;
use crate::error::LedgerError;
use crate::events::{EventDispatcher, LedgerEvent};
use crate::goal::{Goal, GoalRequest};
use crate::registry::GoalRegistry;
use crate::store::LedgerFile;

/// Owns the goal registry and exposes the operations the shell needs.
#[derive(Default)]
pub struct Ledger {
    registry: GoalRegistry,
    dispatcher: EventDispatcher,
}

impl Ledger {
    /// An empty ledger with no event sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger that reports changes to the given dispatcher.
    pub fn with_dispatcher(dispatcher: EventDispatcher) -> Self {
        Self {
            registry: GoalRegistry::new(),
            dispatcher,
        }
    }

    /// Validate the request and append the new goal. Returns its 1-based
    /// listing index.
    pub fn create_goal(&mut self, request: GoalRequest) -> Result<usize, LedgerError> {
        let goal = request.build()?;
        self.registry.add(goal);
        let index = self.registry.len();
        let goal = self.registry.get(index)?;
        tracing::debug!(index, kind = %goal.kind(), name = goal.name(), "goal created");
        self.dispatcher
            .dispatch(&LedgerEvent::goal_created(index, goal));
        Ok(index)
    }

    /// Goals with their 1-based listing index. Empty means no goals yet.
    pub fn list_goals(&self) -> impl Iterator<Item = (usize, &Goal)> + '_ {
        self.registry.list()
    }

    /// Record one event against the goal at a 1-based listing index and
    /// return the points it earned.
    pub fn record_event(&mut self, index: usize) -> Result<u32, LedgerError> {
        let earned = self.registry.record_event_at(index)?;
        let total = self.registry.total_points();
        let goal = self.registry.get(index)?;
        tracing::debug!(index, name = goal.name(), earned, total, "event recorded");
        self.dispatcher
            .dispatch(&LedgerEvent::event_recorded(index, goal, earned, total));
        Ok(earned)
    }

    pub fn total_points(&self) -> u64 {
        self.registry.total_points()
    }

    pub fn registry(&self) -> &GoalRegistry {
        &self.registry
    }

    /// The registry rendered as ledger lines.
    pub fn to_lines(&self) -> Vec<String> {
        codec::encode(&self.registry)
    }

    /// Replace the registry with one decoded from ledger lines.
    ///
    /// On error the current registry is left exactly as it was.
    pub fn load_lines<I, S>(&mut self, lines: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = codec::decode(lines)?;
        self.registry = registry;
        Ok(())
    }

    /// Write the registry to a ledger file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LedgerError> {
        let file = LedgerFile::new(path);
        file.write_lines(&self.to_lines())?;
        tracing::info!(
            path = %file.path().display(),
            goals = self.registry.len(),
            total = self.registry.total_points(),
            "ledger saved"
        );
        self.dispatcher.dispatch(&LedgerEvent::ledger_saved(
            file.path(),
            self.registry.len(),
            self.registry.total_points(),
        ));
        Ok(())
    }

    /// Replace the registry with the contents of a ledger file.
    ///
    /// A missing file, unreadable file, or any bad line leaves the current
    /// registry untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), LedgerError> {
        let file = LedgerFile::new(path);
        let lines = file.read_lines()?;
        self.load_lines(&lines).inspect_err(|e| {
            tracing::warn!(path = %file.path().display(), "ledger load aborted: {}", e);
        })?;
        tracing::info!(
            path = %file.path().display(),
            goals = self.registry.len(),
            total = self.registry.total_points(),
            "ledger loaded"
        );
        self.dispatcher.dispatch(&LedgerEvent::ledger_loaded(
            file.path(),
            self.registry.len(),
            self.registry.total_points(),
        ));
        Ok(())
    }
}
