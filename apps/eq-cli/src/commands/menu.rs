// menu.rs - The interactive menu.
//
// Shows the points total and a six-option menu, reads one choice per line,
// and keeps the ledger in memory until the user saves. Every error is
// printed and the menu comes back; only Quit (or Ctrl-D / Ctrl-C) ends it.

use anyhow::Context;
use eq_goal::{GoalKind, GoalRequest, Ledger};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::goal::print_goals;
use crate::config::QuestConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    CreateGoal,
    ListGoals,
    RecordEvent,
    Save,
    Load,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::CreateGoal),
            "2" => Some(MenuChoice::ListGoals),
            "3" => Some(MenuChoice::RecordEvent),
            "4" => Some(MenuChoice::Save),
            "5" => Some(MenuChoice::Load),
            "6" => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

fn parse_kind(input: &str) -> Option<GoalKind> {
    match input.trim() {
        "1" => Some(GoalKind::Simple),
        "2" => Some(GoalKind::Eternal),
        "3" => Some(GoalKind::Checklist),
        _ => None,
    }
}

fn parse_number(input: &str) -> anyhow::Result<i64> {
    let input = input.trim();
    input
        .parse::<i64>()
        .with_context(|| format!("expected a whole number, got {:?}", input))
}

/// The history entry for an input line; blank lines are not remembered.
fn history_entry(line: &str) -> Option<&str> {
    let entry = line.trim();
    (!entry.is_empty()).then_some(entry)
}

/// Line input for the menu. `None` means the user closed the input.
struct Prompter {
    editor: DefaultEditor,
}

impl Prompter {
    fn new() -> anyhow::Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialize line editor")?;
        Ok(Self { editor })
    }

    fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Some(entry) = history_entry(&line) {
                    if let Err(e) = self.editor.add_history_entry(entry) {
                        tracing::debug!("menu history not updated: {}", e);
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn ask_number(&mut self, prompt: &str) -> anyhow::Result<Option<i64>> {
        match self.ask(prompt)? {
            Some(line) => parse_number(&line).map(Some),
            None => Ok(None),
        }
    }
}

pub fn execute(config: &QuestConfig, resume: bool) -> anyhow::Result<()> {
    let mut ledger = if resume {
        config.open_ledger()?
    } else {
        config.new_ledger()
    };
    let mut prompter = Prompter::new()?;

    loop {
        println!();
        println!("Total Points: {}", ledger.total_points());
        println!("Menu:");
        println!("1. Create New Goal");
        println!("2. List Goals");
        println!("3. Record Event");
        println!("4. Save Goals");
        println!("5. Load Goals");
        println!("6. Quit");

        let Some(line) = prompter.ask("Select an option: ")? else {
            return Ok(());
        };
        let result = match MenuChoice::parse(&line) {
            Some(MenuChoice::CreateGoal) => create_goal(&mut prompter, &mut ledger),
            Some(MenuChoice::ListGoals) => {
                print_goals(&ledger);
                Ok(())
            }
            Some(MenuChoice::RecordEvent) => record_event(&mut prompter, &mut ledger),
            Some(MenuChoice::Save) => save(&mut prompter, &ledger),
            Some(MenuChoice::Load) => load(&mut prompter, &mut ledger),
            Some(MenuChoice::Quit) => return Ok(()),
            None => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::debug!("menu action failed: {:#}", e);
            println!("Error: {:#}", e);
        }
    }
}

fn create_goal(prompter: &mut Prompter, ledger: &mut Ledger) -> anyhow::Result<()> {
    println!("Select Goal Type:");
    println!("1. Simple Goal");
    println!("2. Eternal Goal");
    println!("3. Checklist Goal");
    let Some(choice) = prompter.ask("> ")? else {
        return Ok(());
    };
    let Some(kind) = parse_kind(&choice) else {
        println!("Invalid choice.");
        return Ok(());
    };

    let Some(name) = prompter.ask("Enter name: ")? else {
        return Ok(());
    };
    let Some(description) = prompter.ask("Enter description: ")? else {
        return Ok(());
    };
    let Some(points) = prompter.ask_number("Enter points: ")? else {
        return Ok(());
    };

    let request = match kind {
        GoalKind::Simple => GoalRequest::simple(name, description, points),
        GoalKind::Eternal => GoalRequest::eternal(name, description, points),
        GoalKind::Checklist => {
            let Some(target) = prompter.ask_number("Enter target count: ")? else {
                return Ok(());
            };
            let Some(bonus) = prompter.ask_number("Enter bonus points: ")? else {
                return Ok(());
            };
            GoalRequest::checklist(name, description, points, target, bonus)
        }
    };

    let index = ledger.create_goal(request)?;
    println!("Goal created: {}. {}", index, ledger.registry().get(index)?);
    Ok(())
}

fn record_event(prompter: &mut Prompter, ledger: &mut Ledger) -> anyhow::Result<()> {
    print_goals(ledger);
    if ledger.registry().is_empty() {
        return Ok(());
    }
    let Some(index) = prompter.ask_number("Select a goal to record: ")? else {
        return Ok(());
    };
    // Negative input can never name a goal; report it like any bad index.
    let index = usize::try_from(index).unwrap_or(0);
    let earned = ledger.record_event(index)?;
    println!("You earned {} points!", earned);
    Ok(())
}

fn save(prompter: &mut Prompter, ledger: &Ledger) -> anyhow::Result<()> {
    let Some(file) = prompter.ask("Enter filename to save: ")? else {
        return Ok(());
    };
    ledger.save(file.trim())?;
    println!("Goals saved successfully.");
    Ok(())
}

fn load(prompter: &mut Prompter, ledger: &mut Ledger) -> anyhow::Result<()> {
    let Some(file) = prompter.ask("Enter filename to load: ")? else {
        return Ok(());
    };
    ledger.load(file.trim())?;
    println!("Goals loaded successfully.");
    Ok(())
}
