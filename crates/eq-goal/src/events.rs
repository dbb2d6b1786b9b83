// events.rs - Ledger change events and notification dispatch.
//
// The ledger emits an event after every successful change: a goal created,
// an event recorded, a save, a load. Sinks observe these events; they never
// feed back into the registry, and a failing sink never fails the ledger
// operation that produced the event.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::goal::{Goal, GoalKind};

/// Events emitted by the ledger after a successful change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A goal was validated and appended to the registry.
    GoalCreated {
        index: usize,
        kind: GoalKind,
        name: String,
        points: u32,
        timestamp: DateTime<Utc>,
    },

    /// A completion event was recorded against a goal.
    EventRecorded {
        index: usize,
        name: String,
        points_earned: u32,
        total_points: u64,
        timestamp: DateTime<Utc>,
    },

    /// The registry was written to a ledger file.
    LedgerSaved {
        path: String,
        goal_count: usize,
        total_points: u64,
        timestamp: DateTime<Utc>,
    },

    /// A ledger file replaced the registry.
    LedgerLoaded {
        path: String,
        goal_count: usize,
        total_points: u64,
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            LedgerEvent::GoalCreated { .. } => "goal_created",
            LedgerEvent::EventRecorded { .. } => "event_recorded",
            LedgerEvent::LedgerSaved { .. } => "ledger_saved",
            LedgerEvent::LedgerLoaded { .. } => "ledger_loaded",
        }
    }

    pub fn goal_created(index: usize, goal: &Goal) -> Self {
        LedgerEvent::GoalCreated {
            index,
            kind: goal.kind(),
            name: goal.name().to_string(),
            points: goal.points(),
            timestamp: Utc::now(),
        }
    }

    pub fn event_recorded(index: usize, goal: &Goal, points_earned: u32, total_points: u64) -> Self {
        LedgerEvent::EventRecorded {
            index,
            name: goal.name().to_string(),
            points_earned,
            total_points,
            timestamp: Utc::now(),
        }
    }

    pub fn ledger_saved(path: &Path, goal_count: usize, total_points: u64) -> Self {
        LedgerEvent::LedgerSaved {
            path: path.display().to_string(),
            goal_count,
            total_points,
            timestamp: Utc::now(),
        }
    }

    pub fn ledger_loaded(path: &Path, goal_count: usize, total_points: u64) -> Self {
        LedgerEvent::LedgerLoaded {
            path: path.display().to_string(),
            goal_count,
            total_points,
            timestamp: Utc::now(),
        }
    }
}

/// Receives ledger events.
///
/// A sink is an observer of the ledger: it sees each change after the
/// registry already holds it, and cannot veto or undo it. Sinks that fail to
/// deliver return an error (`LedgerError::Notification` when no more specific
/// variant fits); the dispatcher logs it and the ledger operation still
/// succeeds.
pub trait NotificationSink {
    fn send(&self, event: &LedgerEvent) -> Result<(), LedgerError>;
}

/// Keeps the ledger's history as one JSON object per line.
///
/// The file is an append-only trail next to the ledger (`.quest/events.jsonl`
/// by default). It records how the points total was earned, which the flat
/// ledger format does not keep, and is never read back into a registry.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotificationSink for JsonlSink {
    fn send(&self, event: &LedgerEvent) -> Result<(), LedgerError> {
        // Serialize before opening so a bad event never leaves a partial line.
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| LedgerError::io(parent, source))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|source| LedgerError::io(&self.path, source))
    }
}

/// Fans each ledger event out to every registered sink.
///
/// A ledger with no sinks is normal (tests, `events.enabled = false`); events
/// are then built and dropped. A failing sink is logged via tracing and
/// the remaining sinks still receive the event.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Send `event` to every sink and return how many accepted it.
    pub fn dispatch(&self, event: &LedgerEvent) -> usize {
        let mut delivered = 0;
        for sink in &self.sinks {
            match sink.send(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(event = event.event_type(), "ledger event not delivered: {}", e)
                }
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::GoalRequest;
    use tempfile::tempdir;

    fn goal() -> Goal {
        GoalRequest::eternal("Pray", "morning", 25).build().unwrap()
    }

    #[test]
    fn event_serialization_round_trip() {
        let event = LedgerEvent::event_recorded(2, &goal(), 25, 125);
        let json = serde_json::to_string(&event).unwrap();
        let restored: LedgerEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.event_type(), "event_recorded");
        assert!(json.contains("\"event_type\":\"event_recorded\""));
        assert!(json.contains("\"points_earned\":25"));
    }

    #[test]
    fn goal_created_records_kind() {
        let json = serde_json::to_string(&LedgerEvent::goal_created(1, &goal())).unwrap();
        assert!(json.contains("\"kind\":\"eternal\""));
    }

    #[test]
    fn jsonl_sink_appends_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let sink = JsonlSink::new(&path);

        sink.send(&LedgerEvent::goal_created(1, &goal())).unwrap();
        sink.send(&LedgerEvent::event_recorded(1, &goal(), 25, 25))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("goal_created"));
        assert!(lines[1].contains("event_recorded"));
    }

    #[test]
    fn dispatcher_without_sinks_delivers_nothing() {
        let dispatcher = EventDispatcher::new();
        assert_eq!(dispatcher.sink_count(), 0);
        assert_eq!(dispatcher.dispatch(&LedgerEvent::goal_created(1, &goal())), 0);
    }

    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn send(&self, _event: &LedgerEvent) -> Result<(), LedgerError> {
            Err(LedgerError::Notification("sink offline".to_string()))
        }
    }

    #[test]
    fn dispatcher_keeps_going_past_failing_sink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_sink(Box::new(FailingSink));
        dispatcher.add_sink(Box::new(JsonlSink::new(&path)));

        let delivered =
            dispatcher.dispatch(&LedgerEvent::ledger_saved(Path::new("goals.txt"), 0, 0));

        assert_eq!(dispatcher.sink_count(), 2);
        assert_eq!(delivered, 1);
        assert!(fs::read_to_string(&path).unwrap().contains("ledger_saved"));
    }
}
