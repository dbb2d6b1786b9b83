// goal.rs - Goal subcommands: create, list, record.
//
// Each command loads the working ledger, applies one change, and saves it
// back, so state carries over between invocations.

use clap::{Subcommand, ValueEnum};
use eq_goal::{GoalKind, GoalRequest, Ledger};

use crate::config::QuestConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Pays its points once.
    Simple,
    /// Pays its points every time.
    Eternal,
    /// Pays per event, plus a bonus on reaching the target count.
    Checklist,
}

impl From<KindArg> for GoalKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Simple => GoalKind::Simple,
            KindArg::Eternal => GoalKind::Eternal,
            KindArg::Checklist => GoalKind::Checklist,
        }
    }
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Create {
        /// Goal kind.
        #[arg(value_enum)]
        kind: KindArg,
        /// Goal name (e.g., "Read scriptures").
        name: String,
        /// Free-text description.
        #[arg(long, default_value = "")]
        description: String,
        /// Points earned per qualifying event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
        /// Completions needed for the bonus (checklist only).
        #[arg(long, allow_negative_numbers = true)]
        target: Option<i64>,
        /// One-time bonus on reaching the target (checklist only).
        #[arg(long, allow_negative_numbers = true)]
        bonus: Option<i64>,
    },
    /// List all goals and the points total.
    List,
    /// Record an event against a goal.
    Record {
        /// Goal number as shown by `quest goal list`.
        index: usize,
    },
}

pub fn execute(cmd: &GoalCommands, config: &QuestConfig) -> anyhow::Result<()> {
    let mut ledger = config.open_ledger()?;

    match cmd {
        GoalCommands::Create {
            kind,
            name,
            description,
            points,
            target,
            bonus,
        } => {
            let request = GoalRequest {
                kind: (*kind).into(),
                name: name.clone(),
                description: description.clone(),
                points: *points,
                target_count: *target,
                bonus_points: *bonus,
            };
            let index = ledger.create_goal(request)?;
            ledger.save(&config.ledger_file)?;
            println!("Goal created: {}. {}", index, ledger.registry().get(index)?);
        }
        GoalCommands::List => {
            print_goals(&ledger);
        }
        GoalCommands::Record { index } => {
            let earned = ledger.record_event(*index)?;
            ledger.save(&config.ledger_file)?;
            println!("You earned {} points!", earned);
            println!("Total Points: {}", ledger.total_points());
        }
    }
    Ok(())
}

/// Numbered listing lines, one per goal.
pub fn goal_lines(ledger: &Ledger) -> Vec<String> {
    ledger
        .list_goals()
        .map(|(index, goal)| format!("{}. {}", index, goal))
        .collect()
}

pub fn print_goals(ledger: &Ledger) {
    println!("Total Points: {}", ledger.total_points());
    let lines = goal_lines(ledger);
    if lines.is_empty() {
        println!("No goals created.");
        return;
    }
    for line in lines {
        println!("{}", line);
    }
}
