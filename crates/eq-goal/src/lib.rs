//! # eq-goal
//!
//! Goal model, points registry, and flat-file persistence for Eternal Quest.
//!
//! A [`Goal`] is one of three kinds, each with its own rules for what a
//! recorded event is worth. Goals live in a [`GoalRegistry`] together with
//! the running points total, and the [`Ledger`] controller is the single
//! owner of that registry.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalKind`] - the three goal kinds and their event rules
//! - [`GoalRegistry`] - ordered goals plus the independent points counter
//! - [`codec`] - the line-oriented save/load format
//! - [`LedgerFile`] - reads and writes ledger files on disk
//! - [`Ledger`] - validated creation, event recording, save and load
//! - [`LedgerEvent`] / [`EventDispatcher`] - change notifications (JSONL log)

pub mod codec;
pub mod error;
pub mod events;
pub mod goal;
pub mod ledger;
pub mod registry;
pub mod store;

pub use error::LedgerError;
pub use events::{EventDispatcher, JsonlSink, LedgerEvent, NotificationSink};
pub use goal::{Goal, GoalKind, GoalProgress, GoalRequest};
pub use ledger::Ledger;
pub use registry::GoalRegistry;
pub use store::LedgerFile;
