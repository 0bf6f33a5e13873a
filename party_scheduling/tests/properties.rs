//! Property tests for the slot scoring.

use party_scheduling::builder::TableBuilder;
use party_scheduling::*;
use proptest::prelude::*;

const PARTICIPANTS: [&str; 4] = ["X", "Y", "Z", "Org"];

fn arb_weight() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.0, 0.5, 1.0])
}

fn arb_others() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_weight(), 3)
}

fn table_with(others: &[f64], organizer: f64) -> AvailabilityTable {
    let mut row = others.to_vec();
    row.push(organizer);
    TableBuilder::new(&["S", "T"], &PARTICIPANTS, "Org")
        .unwrap()
        .row("S", &row)
        .unwrap()
        .build()
}

proptest! {
    /// The organizer being unavailable zeroes the slot.
    #[test]
    fn organizer_absence_gates(others in arb_others()) {
        let table = table_with(&others, 0.0);
        prop_assert_eq!(compute_score(&table, "S"), Some(0.0));
    }

    /// Raising one other participant's weight strictly raises the score.
    #[test]
    fn monotonic_in_others(
        others in arb_others(),
        organizer in prop::sample::select(vec![0.5, 1.0]),
        idx in 0usize..3,
    ) {
        prop_assume!(others[idx] < 1.0);
        let before = compute_score(&table_with(&others, organizer), "S").unwrap();
        let mut raised = others.clone();
        raised[idx] += 0.5;
        let after = compute_score(&table_with(&raised, organizer), "S").unwrap();
        prop_assert!(after > before);
    }

    /// An available organizer always gives a strictly positive score.
    #[test]
    fn available_organizer_scores_positive(
        others in arb_others(),
        organizer in prop::sample::select(vec![0.5, 1.0]),
    ) {
        let score = compute_score(&table_with(&others, organizer), "S").unwrap();
        prop_assert!(score > 0.0);
        let expected = organizer * (others.iter().sum::<f64>() + 1.0);
        prop_assert_eq!(score, expected);
    }

    /// Absentees are exactly the participants at 0.0.
    #[test]
    fn absentees_match_zero_weights(others in arb_others(), organizer in arb_weight()) {
        let table = table_with(&others, organizer);
        let mut expected: Vec<String> = Vec::new();
        for (p, w) in PARTICIPANTS.iter().zip(others.iter().chain(std::iter::once(&organizer))) {
            if *w == 0.0 {
                expected.push(p.to_string());
            }
        }
        prop_assert_eq!(absentees(&table, "S"), Some(expected));
    }
}

#[test]
fn baseline_credit() {
    let table = table_with(&[0.0, 0.0, 0.0], 1.0);
    assert_eq!(compute_score(&table, "S"), Some(1.0));
}

#[test]
fn save_column_keeps_other_columns() {
    let table = TableBuilder::new(&["S", "T"], &PARTICIPANTS, "Org")
        .unwrap()
        .row("S", &[1.0, 0.5, 0.0, 1.0])
        .unwrap()
        .row("T", &[0.5, 0.5, 1.0, 0.0])
        .unwrap()
        .build();
    let roster = table.roster().clone();
    let mut store = AvailabilityStore::new(roster, MemoryStorage::with_table(table.clone()));
    store
        .save_column("Y", &[Weight::Preferred, Weight::Unavailable])
        .unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(
        loaded.column("Y"),
        Some(vec![Weight::Preferred, Weight::Unavailable])
    );
    for p in ["X", "Z", "Org"] {
        assert_eq!(loaded.column(p), table.column(p));
    }
}
