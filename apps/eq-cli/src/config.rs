// config.rs - Where the CLI keeps its ledger and event log.
//
// `QuestConfig::for_project()` lays out defaults under `.quest/` in the
// project root. An optional `.quest/config.toml` can move the files or turn
// the event log off; relative paths in it are resolved against the project
// root.

use std::path::{Path, PathBuf};

use anyhow::Context;
use eq_goal::{EventDispatcher, JsonlSink, Ledger};
use serde::{Deserialize, Serialize};

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct QuestConfig {
    /// Working ledger that one-shot commands load from and save back to.
    pub ledger_file: PathBuf,

    /// JSONL log of ledger events.
    pub events_log: PathBuf,

    /// Whether ledger events are appended to `events_log`.
    pub events_enabled: bool,
}

/// Overrides read from `.quest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub ledger_file: Option<PathBuf>,

    pub events_log: Option<PathBuf>,

    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_events_enabled")]
    pub enabled: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: default_events_enabled(),
        }
    }
}

fn default_events_enabled() -> bool {
    true
}

impl QuestConfig {
    /// Default `.quest/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let quest_dir = project_root.as_ref().join(".quest");
        Self {
            ledger_file: quest_dir.join("goals.txt"),
            events_log: quest_dir.join("events.jsonl"),
            events_enabled: true,
        }
    }

    /// Defaults for the project, with `.quest/config.toml` applied if it
    /// exists.
    pub fn load(project_root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = project_root.as_ref();
        let mut config = Self::for_project(root);

        let path = Self::config_path(root);
        if !path.exists() {
            return Ok(config);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "applied config overrides");

        if let Some(ledger_file) = file.ledger_file {
            config.ledger_file = root.join(ledger_file);
        }
        if let Some(events_log) = file.events_log {
            config.events_log = root.join(events_log);
        }
        config.events_enabled = file.events.enabled;
        Ok(config)
    }

    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(".quest").join("config.toml")
    }

    /// Dispatcher wired to the configured event log.
    pub fn dispatcher(&self) -> EventDispatcher {
        let mut dispatcher = EventDispatcher::new();
        if self.events_enabled {
            dispatcher.add_sink(Box::new(JsonlSink::new(&self.events_log)));
        }
        dispatcher
    }

    /// An empty ledger reporting to the configured event log.
    pub fn new_ledger(&self) -> Ledger {
        Ledger::with_dispatcher(self.dispatcher())
    }

    /// The working ledger, loaded from disk if it exists yet.
    pub fn open_ledger(&self) -> anyhow::Result<Ledger> {
        let mut ledger = self.new_ledger();
        if self.ledger_file.exists() {
            ledger.load(&self.ledger_file)?;
        }
        Ok(ledger)
    }
}
