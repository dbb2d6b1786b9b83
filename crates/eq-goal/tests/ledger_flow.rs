// ledger_flow.rs - End-to-end tests for the ledger against real files.
//
// Flow:
//   1. Create goals of every kind through the controller
//   2. Record events and check points earned and the running total
//   3. Save to disk, reload into a fresh ledger, compare listings
//   4. Corrupt files must fail to load and leave the ledger as it was

use std::fs;

use eq_goal::{GoalRequest, Ledger, LedgerError};
use tempfile::tempdir;

fn listing(ledger: &Ledger) -> Vec<String> {
    ledger
        .list_goals()
        .map(|(i, g)| format!("{}. {}", i, g))
        .collect()
}

#[test]
fn simple_goal_scenario() {
    let mut ledger = Ledger::new();
    let idx = ledger
        .create_goal(GoalRequest::simple("Read scriptures", "daily", 100))
        .unwrap();

    assert_eq!(ledger.record_event(idx).unwrap(), 100);
    assert_eq!(ledger.total_points(), 100);
    assert_eq!(ledger.record_event(idx).unwrap(), 0);
    assert_eq!(ledger.total_points(), 100);
}

#[test]
fn checklist_goal_scenario() {
    let mut ledger = Ledger::new();
    let idx = ledger
        .create_goal(GoalRequest::checklist("Exercise", "30 min", 50, 3, 20))
        .unwrap();

    let earned: Vec<u32> = (0..3).map(|_| ledger.record_event(idx).unwrap()).collect();
    assert_eq!(earned, vec![50, 50, 70]);
    assert_eq!(ledger.registry().get(idx).unwrap().current_count(), Some(3));

    assert_eq!(ledger.record_event(idx).unwrap(), 50);
    assert_eq!(ledger.registry().get(idx).unwrap().current_count(), Some(3));
    assert_eq!(ledger.total_points(), 220);
}

#[test]
fn save_and_reload_reproduces_ledger() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");

    let mut ledger = Ledger::new();
    ledger
        .create_goal(GoalRequest::simple("Read scriptures", "daily", 100))
        .unwrap();
    ledger
        .create_goal(GoalRequest::checklist("Exercise", "30 min", 50, 3, 20))
        .unwrap();
    ledger
        .create_goal(GoalRequest::eternal("Pray", "morning and night", 10))
        .unwrap();
    ledger.record_event(1).unwrap();
    ledger.record_event(2).unwrap();
    assert_eq!(ledger.total_points(), 150);

    let before = listing(&ledger);
    ledger.save(&path).unwrap();

    let mut reloaded = Ledger::new();
    reloaded.load(&path).unwrap();

    assert_eq!(reloaded.total_points(), 150);
    assert_eq!(listing(&reloaded), before);
    assert_eq!(
        before,
        vec![
            "1. [X] Read scriptures: daily (100 pts)",
            "2. [ ] Exercise: 30 min (50 pts each, 20 bonus for 3 completions) [1/3]",
            "3. [*] Pray: morning and night (10 pts per event)",
        ]
    );

    // Behavior resumes where it left off.
    assert_eq!(reloaded.record_event(1).unwrap(), 0);
    assert_eq!(reloaded.record_event(2).unwrap(), 50);
    assert_eq!(reloaded.record_event(2).unwrap(), 70);
    assert_eq!(reloaded.record_event(3).unwrap(), 10);
}

#[test]
fn unknown_kind_in_file_leaves_ledger_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");
    fs::write(
        &path,
        "500\nEternal,Pray,morning,10\nMonthly,Budget,review,40\n",
    )
    .unwrap();

    let mut ledger = Ledger::new();
    ledger
        .create_goal(GoalRequest::simple("Read scriptures", "daily", 100))
        .unwrap();
    ledger.record_event(1).unwrap();
    let before = listing(&ledger);

    let err = ledger.load(&path).unwrap_err();
    assert!(matches!(err, LedgerError::UnknownKind { line: 3, .. }));
    assert_eq!(ledger.total_points(), 100);
    assert_eq!(listing(&ledger), before);
}

#[test]
fn malformed_total_leaves_ledger_intact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");
    fs::write(&path, "lots\nEternal,Pray,morning,10\n").unwrap();

    let mut ledger = Ledger::new();
    let err = ledger.load(&path).unwrap_err();
    assert!(matches!(err, LedgerError::Format { line: 1, .. }));
    assert!(ledger.registry().is_empty());
}

#[test]
fn file_written_with_capitalized_flags_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(
        &path,
        "75\r\nSimple,Run a marathon,someday,1000,False\r\nChecklist,Temple,visit,50,10,2,500\r\n",
    )
    .unwrap();

    let mut ledger = Ledger::new();
    ledger.load(&path).unwrap();
    assert_eq!(ledger.total_points(), 75);
    assert_eq!(
        listing(&ledger),
        vec![
            "1. [ ] Run a marathon: someday (1000 pts)",
            "2. [ ] Temple: visit (50 pts each, 500 bonus for 10 completions) [2/10]",
        ]
    );
}
