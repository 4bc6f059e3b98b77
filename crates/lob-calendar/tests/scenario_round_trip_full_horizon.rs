//! Round-trip law over the whole default horizon.
//!
//! For every step in `[0, trading_days * 50)`:
//!   `to_step(to_timestamp(step)) == step`
//!
//! Default horizon: 2019-01-02 (Wed) .. 2020-12-31 (Thu), CN exchange
//! holidays removed = 487 trading days = 24_350 steps.

use lob_calendar::*;

fn default_translator(cache_capacity: usize) -> StepTranslator {
    let settings = TranslatorSettings {
        cache_capacity,
        ..TranslatorSettings::default()
    };
    settings.build_translator().expect("default settings must build")
}

#[test]
fn every_step_round_trips() {
    let t = default_translator(DEFAULT_CACHE_CAPACITY);
    let max = t.max_step().expect("default horizon is not empty");
    assert_eq!(max, 24_349);

    for step in 0..=max {
        let ts = t.to_timestamp(step).unwrap();
        let back = t.to_step(&ts).unwrap();
        assert_eq!(back, step, "round trip broke at step {step} ({ts})");
    }
}

#[test]
fn round_trip_holds_with_shifted_afternoon_session() {
    let cfg = serde_json::json!({ "schedule": { "afternoon_open": "12:57" } });
    let t = TranslatorSettings::from_config_json(&cfg)
        .unwrap()
        .build_translator()
        .unwrap();

    assert_eq!(t.to_timestamp(25).unwrap(), "2019-01-02 12:57");
    assert_eq!(t.to_timestamp(48).unwrap(), "2019-01-02 14:52");

    for step in 0..=t.max_step().unwrap() {
        let ts = t.to_timestamp(step).unwrap();
        assert_eq!(t.to_step(&ts).unwrap(), step, "{ts}");
    }
}

#[test]
fn one_past_max_is_out_of_range() {
    let t = default_translator(0);
    let len = t.calendar().len() as u64;

    let err = t.to_timestamp(len * 50).unwrap_err();
    assert_eq!(
        err,
        StepError::OutOfRange {
            step: 24_350,
            max_step: Some(24_349)
        }
    );
}

#[test]
fn steps_are_monotonic_in_time() {
    let t = default_translator(0);
    let mut prev = t.resolve(0).unwrap().at;
    for step in 1..=t.max_step().unwrap() {
        let at = t.resolve(step).unwrap().at;
        assert!(at > prev, "step {step} is not after step {}", step - 1);
        prev = at;
    }
}
