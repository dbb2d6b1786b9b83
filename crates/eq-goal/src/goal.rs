// goal.rs - Goal: one trackable objective and its event rules.
//
// A goal is one of three kinds, fixed at construction:
//   Simple    - pays its points once, then nothing
//   Eternal   - pays its points on every event, no state
//   Checklist - pays its points per event, plus a one-time bonus on the
//               event that reaches the target count
//
// Kind-specific state lives in `GoalProgress`, which is only mutated by
// `record_event` (or set once while restoring a saved ledger).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::LedgerError;

/// The variant of a goal. Determines display and event-processing rules.
///
/// `Display` renders the tag used in ledger files (`Simple`, `Eternal`,
/// `Checklist`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Simple,
    Eternal,
    Checklist,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl GoalKind {
    /// The exact tag written as the first field of a ledger record.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple => "Simple",
            GoalKind::Eternal => "Eternal",
            GoalKind::Checklist => "Checklist",
        }
    }

    /// Parse a ledger record tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Simple" => Some(GoalKind::Simple),
            "Eternal" => Some(GoalKind::Eternal),
            "Checklist" => Some(GoalKind::Checklist),
            _ => None,
        }
    }
}

/// Kind-specific mutable state of a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalProgress {
    Simple {
        completed: bool,
    },
    Eternal,
    /// Invariant: `target_count > 0` and `current_count <= target_count`.
    Checklist {
        current_count: u32,
        target_count: u32,
        bonus_points: u32,
    },
}

impl GoalProgress {
    pub fn kind(&self) -> GoalKind {
        match self {
            GoalProgress::Simple { .. } => GoalKind::Simple,
            GoalProgress::Eternal => GoalKind::Eternal,
            GoalProgress::Checklist { .. } => GoalKind::Checklist,
        }
    }
}

/// A trackable objective that yields points when an event is recorded.
///
/// Name, description, and base points are immutable after creation. Build
/// new goals through [`GoalRequest`], which validates the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    description: String,
    points: u32,
    progress: GoalProgress,
}

impl Goal {
    /// Assemble a goal from already-validated parts.
    pub(crate) fn from_parts(
        name: impl Into<String>,
        description: impl Into<String>,
        points: u32,
        progress: GoalProgress,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            progress,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base reward per qualifying event.
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn kind(&self) -> GoalKind {
        self.progress.kind()
    }

    pub fn progress(&self) -> &GoalProgress {
        &self.progress
    }

    /// Current count for checklist goals, `None` for the other kinds.
    pub fn current_count(&self) -> Option<u32> {
        match self.progress {
            GoalProgress::Checklist { current_count, .. } => Some(current_count),
            _ => None,
        }
    }

    /// Whether a simple goal has been completed. Always false for the
    /// other kinds, including a checklist that reached its target.
    pub fn is_completed(&self) -> bool {
        matches!(self.progress, GoalProgress::Simple { completed: true })
    }

    /// Process one completion event and return the points it earned.
    ///
    /// - Simple: `points` the first time, `0` on every repeat.
    /// - Eternal: `points`, every time.
    /// - Checklist: `points` per event, `points + bonus_points` on the event
    ///   that reaches the target. Events past the target still earn
    ///   `points` and leave the count at the target.
    pub fn record_event(&mut self) -> u32 {
        match &mut self.progress {
            GoalProgress::Simple { completed } => {
                if *completed {
                    0
                } else {
                    *completed = true;
                    self.points
                }
            }
            GoalProgress::Eternal => self.points,
            GoalProgress::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => {
                if *current_count >= *target_count {
                    *current_count = *target_count;
                    return self.points;
                }
                *current_count += 1;
                if *current_count == *target_count {
                    self.points.saturating_add(*bonus_points)
                } else {
                    self.points
                }
            }
        }
    }

    /// The comma-joined ledger record for this goal.
    pub fn to_record(&self) -> String {
        codec::encode_goal(self)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.progress {
            GoalProgress::Simple { completed } => {
                let marker = if *completed { "[X]" } else { "[ ]" };
                write!(
                    f,
                    "{} {}: {} ({} pts)",
                    marker, self.name, self.description, self.points
                )
            }
            GoalProgress::Eternal => write!(
                f,
                "[*] {}: {} ({} pts per event)",
                self.name, self.description, self.points
            ),
            // Checklist goals never show the complete marker, even at target.
            GoalProgress::Checklist {
                current_count,
                target_count,
                bonus_points,
            } => write!(
                f,
                "[ ] {}: {} ({} pts each, {} bonus for {} completions) [{}/{}]",
                self.name,
                self.description,
                self.points,
                bonus_points,
                target_count,
                current_count,
                target_count
            ),
        }
    }
}

/// Unvalidated arguments for creating a goal.
///
/// Numeric fields are signed so that out-of-range user input reaches
/// validation instead of failing earlier in parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRequest {
    pub kind: GoalKind,
    pub name: String,
    pub description: String,
    pub points: i64,
    pub target_count: Option<i64>,
    pub bonus_points: Option<i64>,
}

impl GoalRequest {
    pub fn simple(name: impl Into<String>, description: impl Into<String>, points: i64) -> Self {
        Self::base(GoalKind::Simple, name, description, points)
    }

    pub fn eternal(name: impl Into<String>, description: impl Into<String>, points: i64) -> Self {
        Self::base(GoalKind::Eternal, name, description, points)
    }

    pub fn checklist(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target_count: i64,
        bonus_points: i64,
    ) -> Self {
        Self {
            target_count: Some(target_count),
            bonus_points: Some(bonus_points),
            ..Self::base(GoalKind::Checklist, name, description, points)
        }
    }

    fn base(
        kind: GoalKind,
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            points,
            target_count: None,
            bonus_points: None,
        }
    }

    /// Check every constraint and build the goal. All violations are
    /// reported together.
    pub fn build(self) -> Result<Goal, LedgerError> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push("name must not be empty".to_string());
        }
        check_text("name", &self.name, &mut violations);
        check_text("description", &self.description, &mut violations);
        let points = check_count("points", self.points, 0, &mut violations);

        let progress = match self.kind {
            GoalKind::Simple | GoalKind::Eternal => {
                if self.target_count.is_some() || self.bonus_points.is_some() {
                    violations.push(format!(
                        "{} goals take no target count or bonus points",
                        self.kind.tag().to_lowercase()
                    ));
                }
                if self.kind == GoalKind::Simple {
                    GoalProgress::Simple { completed: false }
                } else {
                    GoalProgress::Eternal
                }
            }
            GoalKind::Checklist => {
                let target_count = match self.target_count {
                    Some(t) => check_count("target count", t, 1, &mut violations),
                    None => {
                        violations.push("checklist goals need a target count".to_string());
                        0
                    }
                };
                let bonus_points = match self.bonus_points {
                    Some(b) => check_count("bonus points", b, 0, &mut violations),
                    None => {
                        violations.push("checklist goals need bonus points".to_string());
                        0
                    }
                };
                GoalProgress::Checklist {
                    current_count: 0,
                    target_count,
                    bonus_points,
                }
            }
        };

        if !violations.is_empty() {
            return Err(LedgerError::Validation { violations });
        }
        Ok(Goal::from_parts(self.name, self.description, points, progress))
    }
}

/// Ledger records are comma-joined lines with no escaping, so text fields
/// may not carry a field or record separator.
fn check_text(field: &str, value: &str, violations: &mut Vec<String>) {
    if value.contains([',', '\n', '\r']) {
        violations.push(format!("{} must not contain ',' or line breaks", field));
    }
}

/// Range-check a signed argument into `min..=u32::MAX`, recording a
/// violation (and returning 0) when it falls outside.
fn check_count(field: &str, value: i64, min: i64, violations: &mut Vec<String>) -> u32 {
    if value < min {
        let bound = if min == 0 { ">= 0" } else { "> 0" };
        violations.push(format!("{} must be {} (got {})", field, bound, value));
        return 0;
    }
    match u32::try_from(value) {
        Ok(v) => v,
        Err(_) => {
            violations.push(format!(
                "{} must be at most {} (got {})",
                field,
                u32::MAX,
                value
            ));
            0
        }
    }
}
