//! Property tests for the history ledger and its undo/redo stacks.
//!
//! Reproduce a failure: `PROPTEST_SEED=<seed> cargo test --test history_properties`

use calc_repl::{CalcError, CalculationRecord, HistoryLedger};
use proptest::prelude::*;

fn record(i: usize) -> CalculationRecord {
    let a = i as f64;
    CalculationRecord::new("add", a, 1.0, a + 1.0)
}

#[derive(Clone, Debug)]
enum Step {
    Append,
    Undo,
    Redo,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![3 => Just(Step::Append), 2 => Just(Step::Undo), 2 => Just(Step::Redo)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn bounded_ledger_keeps_last_max_size(max_size in 1usize..20, extra in 1usize..40) {
        let n = max_size + extra;
        let mut ledger = HistoryLedger::new(max_size);
        let all: Vec<_> = (0..n).map(record).collect();
        for r in &all {
            ledger.append(r.clone());
            prop_assert!(ledger.len() <= max_size);
        }
        prop_assert_eq!(ledger.len(), max_size);
        prop_assert_eq!(ledger.get_all(), all[n - max_size..].to_vec());
    }

    #[test]
    fn undo_then_redo_is_identity(max_size in 1usize..10, n in 1usize..25) {
        let mut ledger = HistoryLedger::new(max_size);
        for i in 0..n {
            ledger.append(record(i));
        }
        let before = ledger.get_all();
        let undone = ledger.undo().unwrap();
        let redone = ledger.redo().unwrap();
        prop_assert_eq!(undone, redone);
        prop_assert_eq!(ledger.get_all(), before);
    }

    #[test]
    fn append_after_undo_clears_redo(n in 1usize..10, undos in 1usize..10) {
        let mut ledger = HistoryLedger::new(16);
        for i in 0..n {
            ledger.append(record(i));
        }
        for _ in 0..undos.min(n) {
            ledger.undo().unwrap();
        }
        ledger.append(record(100));
        prop_assert!(matches!(ledger.redo(), Err(CalcError::NothingToRedo)));
    }

    #[test]
    fn random_walk_matches_two_stack_model(max_size in 1usize..6, steps in prop::collection::vec(arb_step(), 0..60)) {
        let mut ledger = HistoryLedger::new(max_size);
        let mut active: Vec<CalculationRecord> = Vec::new();
        let mut redo: Vec<CalculationRecord> = Vec::new();
        for (i, step) in steps.into_iter().enumerate() {
            match step {
                Step::Append => {
                    let r = record(i);
                    ledger.append(r.clone());
                    active.push(r);
                    if active.len() > max_size {
                        active.remove(0);
                    }
                    redo.clear();
                }
                Step::Undo => match active.pop() {
                    Some(r) => {
                        prop_assert_eq!(ledger.undo().unwrap(), r.clone());
                        redo.push(r);
                    }
                    None => {
                        prop_assert!(matches!(ledger.undo(), Err(CalcError::EmptyHistory)));
                    }
                },
                Step::Redo => match redo.pop() {
                    Some(r) => {
                        prop_assert_eq!(ledger.redo().unwrap(), r.clone());
                        active.push(r);
                    }
                    None => {
                        prop_assert!(matches!(ledger.redo(), Err(CalcError::NothingToRedo)));
                    }
                },
            }
            prop_assert_eq!(ledger.get_all(), active.clone());
            prop_assert_eq!(ledger.redo_len(), redo.len());
            prop_assert!(ledger.len() + ledger.redo_len() <= max_size);
        }
    }
}

#[test]
fn eviction_is_not_undoable() {
    let mut ledger = HistoryLedger::new(2);
    let (a, b, c) = (record(0), record(1), record(2));
    ledger.append(a.clone());
    ledger.append(b.clone());
    ledger.append(c.clone());

    assert_eq!(ledger.undo().unwrap(), c);
    assert_eq!(ledger.get_all(), vec![b.clone()]);
    assert_eq!(ledger.undo().unwrap(), b);
    assert!(ledger.get_all().is_empty());
    ledger.redo().unwrap();
    ledger.redo().unwrap();
    assert_eq!(ledger.get_all(), vec![b, c]);
    assert!(!ledger.get_all().contains(&a));
}
