/*!
Availability collection and slot ranking for a small group with one organizer.

Each participant marks every candidate slot as `no` (0.0), `maybe` (0.5) or `yes` (1.0).
The score of a slot is

```text
score = organizer_weight * (sum of the other weights + 1)
```

so a slot the organizer cannot attend always scores zero, and a slot the organizer
can attend always scores above zero.

```
use party_scheduling::*;

let roster = Roster::new(
    &["A".to_string(), "B".to_string()],
    &["X".to_string(), "Y".to_string(), "Org".to_string()],
    "Org",
)?;
let mut scheduler = Scheduler::new(
    AvailabilityStore::new(roster, MemoryStorage::new()),
    ScoringRules::DEFAULT_RULES,
);
scheduler.initialize_if_absent()?;
scheduler.submit_availability("X", &[1.0, 0.0])?;
scheduler.submit_availability("Y", &[0.5, 0.0])?;
scheduler.submit_availability("Org", &[1.0, 1.0])?;

let best = scheduler.get_best_slot()?;
assert_eq!(best.slot, "A");
assert_eq!(best.score, 2.5);
# Ok::<(), SchedulingError>(())
```
*/

mod config;
pub mod builder;
pub mod manual;
pub mod store;

use log::{debug, info};

pub use crate::config::*;
pub use crate::store::{AvailabilityStore, MemoryStorage, TableStorage};

/// The score of a slot, or None if the slot is not part of the table.
pub fn compute_score(table: &AvailabilityTable, slot: &str) -> Option<f64> {
    let row = table.row(slot)?;
    let organizer_idx = table.participant_index(table.organizer())?;
    let master_weight = row[organizer_idx].value();
    let others_sum: f64 = row
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != organizer_idx)
        .map(|(_, w)| w.value())
        .sum();
    Some(master_weight * (others_sum + 1.0))
}

/// Scores every slot, in the canonical slot order.
pub fn score_slots(table: &AvailabilityTable, rules: &ScoringRules) -> Vec<ScoredSlot> {
    let mut res: Vec<ScoredSlot> = Vec::new();
    for slot in table.slots() {
        // The slot comes from the table itself.
        let score = compute_score(table, slot).unwrap_or(0.0);
        res.push(ScoredSlot {
            slot: slot.clone(),
            score,
            quorum: score >= rules.quorum_threshold,
        });
    }
    debug!("score_slots: {:?}", res);
    res
}

/// The slot with the highest score.
///
/// Ties go to the slot that comes first in the canonical order.
pub fn best_slot(table: &AvailabilityTable, rules: &ScoringRules) -> Option<ScoredSlot> {
    let mut best: Option<ScoredSlot> = None;
    for scored in score_slots(table, rules) {
        match &best {
            Some(b) if scored.score <= b.score => {}
            _ => best = Some(scored),
        }
    }
    best
}

pub fn quorum_status(table: &AvailabilityTable, slot: &str, quorum_threshold: f64) -> Option<bool> {
    compute_score(table, slot).map(|score| score >= quorum_threshold)
}

/// The participants who cannot attend the slot, in participant order.
pub fn absentees(table: &AvailabilityTable, slot: &str) -> Option<Vec<String>> {
    let row = table.row(slot)?;
    Some(
        table
            .participants()
            .iter()
            .zip(row.iter())
            .filter(|(_, w)| **w == Weight::Unavailable)
            .map(|(p, _)| p.clone())
            .collect(),
    )
}

pub fn organizer_present(table: &AvailabilityTable, slot: &str) -> Option<bool> {
    table
        .weight(slot, table.organizer())
        .map(|w| w != Weight::Unavailable)
}

/// Computes all the dashboard figures from a table.
pub fn summarize(table: &AvailabilityTable, rules: &ScoringRules) -> Option<ScheduleSummary> {
    let scores = score_slots(table, rules);
    let best = best_slot(table, rules)?;
    let organizer_present = organizer_present(table, &best.slot)?;
    let absentees = absentees(table, &best.slot)?;
    info!(
        "Best slot: {} (score {:.1}, organizer present: {}, absent: {:?})",
        best.slot, best.score, organizer_present, absentees
    );
    Some(ScheduleSummary {
        scores,
        best,
        organizer_present,
        absentees,
    })
}

/// The operations offered to a presentation layer.
///
/// Scores are recomputed from the persisted table on every call.
pub struct Scheduler<S: TableStorage> {
    store: AvailabilityStore<S>,
    rules: ScoringRules,
}

impl<S: TableStorage> Scheduler<S> {
    pub fn new(store: AvailabilityStore<S>, rules: ScoringRules) -> Scheduler<S> {
        Scheduler { store, rules }
    }

    pub fn initialize_if_absent(&mut self) -> Result<bool, SchedulingError> {
        self.store.initialize_if_absent()
    }

    pub fn get_table(&self) -> Result<AvailabilityTable, SchedulingError> {
        self.store.load()
    }

    pub fn get_scores(&self) -> Result<Vec<ScoredSlot>, SchedulingError> {
        let table = self.store.load()?;
        Ok(score_slots(&table, &self.rules))
    }

    pub fn get_best_slot(&self) -> Result<ScoredSlot, SchedulingError> {
        let table = self.store.load()?;
        // A roster always has at least one slot.
        best_slot(&table, &self.rules)
            .ok_or_else(|| SchedulingError::StorageRead("table has no slots".to_string()))
    }

    pub fn get_summary(&self) -> Result<ScheduleSummary, SchedulingError> {
        let table = self.store.load()?;
        summarize(&table, &self.rules)
            .ok_or_else(|| SchedulingError::StorageRead("table has no slots".to_string()))
    }

    /// Replaces the column of `participant` with the given values.
    ///
    /// The values must be one per slot, in slot order, each one of 0.0, 0.5 or 1.0.
    /// Nothing is written if any check fails.
    pub fn submit_availability(
        &mut self,
        participant: &str,
        values: &[f64],
    ) -> Result<(), SchedulingError> {
        let weights = validate_submission(self.store.roster(), participant, values)?;
        info!("Saving availability for {}", participant);
        self.store.save_column(participant, &weights)
    }
}

/// Checks a submission against the roster and converts it to weights.
pub fn validate_submission(
    roster: &Roster,
    participant: &str,
    values: &[f64],
) -> Result<Vec<Weight>, SchedulingError> {
    if !roster.participants().iter().any(|p| p == participant) {
        return Err(SchedulingError::Validation(format!(
            "unknown participant {:?}",
            participant
        )));
    }
    if values.len() != roster.slots().len() {
        return Err(SchedulingError::Validation(format!(
            "expected {} values, got {}",
            roster.slots().len(),
            values.len()
        )));
    }
    let mut weights: Vec<Weight> = Vec::new();
    for (slot, x) in roster.slots().iter().zip(values.iter()) {
        let w = Weight::from_value(*x).ok_or_else(|| {
            SchedulingError::Validation(format!(
                "slot {:?}: {} is not one of 0.0, 0.5, 1.0",
                slot, x
            ))
        })?;
        weights.push(w);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn two_slots() -> TableBuilder {
        init_logs();
        TableBuilder::new(&["A", "B"], &["X", "Y", "Org"], "Org").unwrap()
    }

    #[test]
    fn scenario_best_slot() {
        let table = two_slots()
            .row("A", &[1.0, 0.5, 1.0])
            .unwrap()
            .row("B", &[0.0, 0.0, 1.0])
            .unwrap()
            .build();
        assert_eq!(compute_score(&table, "A"), Some(2.5));
        assert_eq!(compute_score(&table, "B"), Some(1.0));
        let best = best_slot(&table, &ScoringRules::DEFAULT_RULES).unwrap();
        assert_eq!(best.slot, "A");
        assert_eq!(best.score, 2.5);
    }

    #[test]
    fn organizer_absent_vetoes_slot() {
        let table = two_slots().row("A", &[1.0, 1.0, 0.0]).unwrap().build();
        assert_eq!(compute_score(&table, "A"), Some(0.0));
        assert_eq!(organizer_present(&table, "A"), Some(false));
    }

    #[test]
    fn baseline_credit_for_organizer_alone() {
        let table = two_slots().row("B", &[0.0, 0.0, 1.0]).unwrap().build();
        assert_eq!(compute_score(&table, "B"), Some(1.0));
    }

    #[test]
    fn organizer_maybe_halves_score() {
        let table = two_slots().row("A", &[1.0, 1.0, 0.5]).unwrap().build();
        assert_eq!(compute_score(&table, "A"), Some(1.5));
    }

    #[test]
    fn ties_resolve_to_first_slot() {
        let table = two_slots()
            .row("A", &[0.5, 0.0, 1.0])
            .unwrap()
            .row("B", &[0.0, 0.5, 1.0])
            .unwrap()
            .build();
        let best = best_slot(&table, &ScoringRules::DEFAULT_RULES).unwrap();
        assert_eq!(best.slot, "A");

        // All zero: still the first slot.
        let empty = two_slots().build();
        let best = best_slot(&empty, &ScoringRules::DEFAULT_RULES).unwrap();
        assert_eq!(best.slot, "A");
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn absentees_are_exact() {
        let table = two_slots().row("A", &[0.0, 0.5, 1.0]).unwrap().build();
        assert_eq!(absentees(&table, "A"), Some(vec!["X".to_string()]));
        assert_eq!(
            absentees(&table, "B"),
            Some(vec!["X".to_string(), "Y".to_string(), "Org".to_string()])
        );
        assert_eq!(absentees(&table, "C"), None);
    }

    #[test]
    fn quorum_threshold() {
        let table = two_slots().row("A", &[1.0, 1.0, 1.0]).unwrap().build();
        // 1.0 * (2.0 + 1) = 3.0
        assert_eq!(quorum_status(&table, "A", 4.0), Some(false));
        assert_eq!(quorum_status(&table, "A", 3.0), Some(true));
        let scores = score_slots(&table, &ScoringRules { quorum_threshold: 3.0 });
        assert!(scores[0].quorum);
        assert!(!scores[1].quorum);
    }

    #[test]
    fn unknown_slot_has_no_score() {
        let table = two_slots().build();
        assert_eq!(compute_score(&table, "Z"), None);
        assert_eq!(quorum_status(&table, "Z", 4.0), None);
    }

    #[test]
    fn summary_of_best_slot() {
        let table = two_slots()
            .row("A", &[0.0, 1.0, 1.0])
            .unwrap()
            .row("B", &[1.0, 1.0, 0.0])
            .unwrap()
            .build();
        let summary = summarize(&table, &ScoringRules::DEFAULT_RULES).unwrap();
        assert_eq!(summary.best.slot, "A");
        assert!(summary.organizer_present);
        assert_eq!(summary.absentees, vec!["X".to_string()]);
        assert_eq!(summary.scores.len(), 2);
        assert_eq!(summary.scores[1].score, 0.0);
    }

    fn scheduler() -> Scheduler<MemoryStorage> {
        let roster = two_slots().roster().clone();
        let mut s = Scheduler::new(
            AvailabilityStore::new(roster, MemoryStorage::new()),
            ScoringRules::DEFAULT_RULES,
        );
        s.initialize_if_absent().unwrap();
        s
    }

    #[test]
    fn submit_rejects_wrong_length() {
        let mut s = scheduler();
        let res = s.submit_availability("X", &[1.0]);
        assert!(matches!(res, Err(SchedulingError::Validation(_))));
    }

    #[test]
    fn submit_rejects_out_of_domain_values() {
        let mut s = scheduler();
        for bad in [0.25, -1.0, 1.5, f64::NAN] {
            let res = s.submit_availability("X", &[bad, 0.0]);
            assert!(matches!(res, Err(SchedulingError::Validation(_))));
        }
        let table = s.get_table().unwrap();
        assert_eq!(table, AvailabilityTable::empty(table.roster()));
    }

    #[test]
    fn submit_rejects_unknown_participant() {
        let mut s = scheduler();
        let res = s.submit_availability("Nobody", &[1.0, 1.0]);
        assert!(matches!(res, Err(SchedulingError::Validation(_))));
    }

    #[test]
    fn submit_then_rank() {
        let mut s = scheduler();
        s.submit_availability("Org", &[0.5, 1.0]).unwrap();
        s.submit_availability("X", &[1.0, 0.5]).unwrap();
        let scores = s.get_scores().unwrap();
        assert_eq!(scores[0].score, 1.0);
        assert_eq!(scores[1].score, 1.5);
        assert_eq!(s.get_best_slot().unwrap().slot, "B");
        let summary = s.get_summary().unwrap();
        assert_eq!(summary.absentees, vec!["Y".to_string()]);
    }
}
