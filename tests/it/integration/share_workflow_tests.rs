//! Share link round-trip tests

use crate::helpers::{TestStateBuilder, fixture_file, row};
use chartify::data::{LoadLimits, load_into_state};
use chartify::share::{decode_state_from_fragment, encode_state_to_url, fragment_of};
use chartify::state::{Action, AppState};
use chartify::types::{Cell, ChartType, Row, Summary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn round_trip(state: &AppState) -> AppState {
    let url = encode_state_to_url("https://chartify.test/app", state).unwrap();
    decode_state_from_fragment(fragment_of(&url)).unwrap().unwrap()
}

#[test]
fn test_bar_state_round_trip() {
    let state = TestStateBuilder::new(vec![
        row(&[("cat", "A"), ("val", "10")]),
        row(&[("cat", "B"), ("val", "5")]),
    ])
    .title("Quarterly totals")
    .filter("val", "between", "1", Some("8"))
    .build();

    let restored = round_trip(&state);
    assert_eq!(restored.chart_type, ChartType::Bar);
    assert_eq!(restored.title, "Quarterly totals");
    assert_eq!(restored.filters, state.filters);
    assert_eq!(restored, state);
}

#[test]
fn test_restored_state_renders_same_series() {
    let state = TestStateBuilder::new(vec![
        row(&[("day", "2024-01-01"), ("team", "red"), ("pts", "3")]),
        row(&[("day", "2024-01-02"), ("team", "blue"), ("pts", "x")]),
        row(&[("day", "2024-01-01"), ("team", "blue"), ("pts", "4.5")]),
    ])
    .chart(ChartType::Line)
    .palette("tealOrange")
    .filter("team", "contains", "e", None)
    .build()
    .reduce(Action::SetSummary(Summary::Count))
    .reduce(Action::SetShowDataLabels(true));

    let restored = round_trip(&state);
    assert_eq!(restored.chart_series(), state.chart_series());
    assert!(restored.show_data_labels);
}

#[test]
fn test_unicode_and_awkward_text_round_trip() {
    let state = TestStateBuilder::new(vec![row(&[
        ("名前", "naïve \"quoted\" & = # + %20"),
        ("emoji", "🚀"),
    ])])
    .title("Ünïcode / title?")
    .build();

    assert_eq!(round_trip(&state), state);
}

#[test]
fn test_fractional_numbers_round_trip_exactly() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let rows: Vec<Row> = (0..5_000)
        .map(|_| {
            [
                ("price", Cell::Number(rng.gen_range(0.0..1000.0))),
                ("ratio", Cell::Number(rng.r#gen::<f64>() * 1e-3)),
            ]
            .into_iter()
            .collect()
        })
        .collect();
    let state = AppState::new().reduce(Action::DataLoaded(rows));

    let restored = round_trip(&state);
    let mismatched = state
        .rows
        .iter()
        .zip(&restored.rows)
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(mismatched, 0);
    assert_eq!(restored.rows, state.rows);
}

#[test]
fn test_loaded_file_round_trip() {
    let (_dir, path) = fixture_file(
        "mixed.json",
        r#"[{"n": 1.5, "ok": true, "none": null, "s": "x"}, {"n": -2, "ok": false, "none": null, "s": ""}]"#,
    );
    let state = load_into_state(&AppState::new(), &path, &LoadLimits::default(), 100).unwrap();

    let restored = round_trip(&state);
    assert_eq!(restored.rows, state.rows);
    assert_eq!(restored.columns, state.columns);
}

#[test]
fn test_link_survives_percent_encoding() {
    let url = encode_state_to_url("https://chartify.test/app", &AppState::new()).unwrap();
    let fragment = fragment_of(&url).replace('-', "%2D");
    assert_eq!(
        decode_state_from_fragment(&fragment).unwrap(),
        Some(AppState::new())
    );
}
