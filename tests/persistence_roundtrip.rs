//! Save/load through the JSON file store, end to end.

use calc_repl::config::DEFAULT_MAX_INPUT_VALUE;
use calc_repl::{
    CalcError, CalculationRecord, Calculator, CalculatorConfig, HistoryStore, JsonFileStore,
    PersistenceError,
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;

fn calculator_at(dir: &std::path::Path, auto_save: bool) -> Calculator {
    let mut config = CalculatorConfig::with_base_dir(dir);
    config.auto_save = auto_save;
    let store = JsonFileStore::new(config.history_file.clone());
    Calculator::new(config, Box::new(store))
}

#[test]
fn save_then_load_on_fresh_calculator_reproduces_history() {
    let dir = tempdir().unwrap();
    let mut first = calculator_at(dir.path(), false);
    first.calculate("add", "2", "3").unwrap();
    first.calculate("multiply", "4", "5").unwrap();
    first.calculate("divide", "1", "3").unwrap();
    first.undo().unwrap();
    first.save().unwrap();

    let mut second = calculator_at(dir.path(), false);
    assert_eq!(second.load().unwrap(), 2);
    assert_eq!(second.history(), first.history());
    assert!(matches!(second.redo(), Err(CalcError::NothingToRedo)));
}

#[test]
fn stored_file_is_a_json_array_of_records() {
    let dir = tempdir().unwrap();
    let mut calc = calculator_at(dir.path(), true);
    calc.calculate("add", "2", "3").unwrap();

    let path = calc.config().history_file.clone();
    let value: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    let keys: Vec<&str> = entries[0].as_object().unwrap().keys().map(String::as_str).collect();
    for key in ["operation", "operand_a", "operand_b", "result", "timestamp"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(entries[0]["operation"], "add");
    assert_eq!(entries[0]["result"], 5.0);
}

#[test]
fn corrupt_file_fails_load_and_keeps_history() {
    let dir = tempdir().unwrap();
    let mut calc = calculator_at(dir.path(), false);
    calc.calculate("add", "2", "3").unwrap();

    let path = calc.config().history_file.clone();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, br#"[{"operation":"add","operand_a":1.0}]"#).unwrap();

    let err = calc.load().unwrap_err();
    assert!(matches!(err, CalcError::Persistence(PersistenceError::Format { .. })));
    assert_eq!(calc.history().len(), 1);
}

#[test]
fn overwrite_replaces_previous_contents() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("h.json"));
    let mut calc = calculator_at(dir.path(), false);
    calc.calculate("add", "1", "1").unwrap();
    calc.calculate("add", "2", "2").unwrap();
    store.save(&calc.history()).unwrap();
    calc.clear_history();
    store.save(&calc.history()).unwrap();
    assert!(store.load().unwrap().is_empty());
}

fn arb_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -DEFAULT_MAX_INPUT_VALUE..DEFAULT_MAX_INPUT_VALUE,
        -1.0f64..1.0,
        Just(981_548_020_048_564.1),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn file_round_trip_is_bit_exact(
        values in prop::collection::vec((arb_value(), arb_value(), arb_value()), 1..8),
    ) {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("history.json"));
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let records: Vec<CalculationRecord> = values
            .into_iter()
            .map(|(a, b, r)| CalculationRecord::with_timestamp("add", a, b, r, at))
            .collect();
        store.save(&records).unwrap();
        let back = store.load().unwrap();
        prop_assert_eq!(back.len(), records.len());
        for (loaded, saved) in back.iter().zip(&records) {
            prop_assert_eq!(loaded.operand_a().to_bits(), saved.operand_a().to_bits());
            prop_assert_eq!(loaded.operand_b().to_bits(), saved.operand_b().to_bits());
            prop_assert_eq!(loaded.result().to_bits(), saved.result().to_bits());
        }
        prop_assert_eq!(back, records);
    }
}

#[test]
fn sixteen_digit_operands_survive_save_and_load() {
    let dir = tempdir().unwrap();
    let mut calc = calculator_at(dir.path(), false);
    calc.calculate("add", "981548020048564.1", "0").unwrap();
    calc.save().unwrap();

    let mut fresh = calculator_at(dir.path(), false);
    fresh.load().unwrap();
    assert_eq!(fresh.history(), calc.history());
    assert_eq!(fresh.history()[0].operand_a(), 981_548_020_048_564.1);
}
