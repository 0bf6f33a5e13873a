// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

/// The availability of one participant for one slot.
///
/// Only three levels exist, so a table can never hold a value outside of them.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, PartialOrd, Ord, Default)]
pub enum Weight {
    /// Cannot attend (0.0).
    #[default]
    Unavailable,
    /// Can attend with some effort (0.5).
    Possible,
    /// Prefers this slot (1.0).
    Preferred,
}

impl Weight {
    pub const ALL: [Weight; 3] = [Weight::Unavailable, Weight::Possible, Weight::Preferred];

    /// The numeric value used by the scoring.
    pub fn value(self) -> f64 {
        match self {
            Weight::Unavailable => 0.0,
            Weight::Possible => 0.5,
            Weight::Preferred => 1.0,
        }
    }

    /// Strict conversion: anything other than exactly 0.0, 0.5 or 1.0 is refused.
    pub fn from_value(x: f64) -> Option<Weight> {
        Weight::ALL.iter().copied().find(|w| w.value() == x)
    }

    pub fn label(self) -> &'static str {
        match self {
            Weight::Unavailable => "no",
            Weight::Possible => "maybe",
            Weight::Preferred => "yes",
        }
    }

    pub fn from_label(s: &str) -> Option<Weight> {
        let s = s.trim().to_lowercase();
        Weight::ALL.iter().copied().find(|w| w.label() == s)
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

/// The fixed configuration of a group: which slots are candidates, who takes part,
/// and who the organizer is.
///
/// The order of slots and participants is the canonical order used everywhere
/// (display, persisted layout, tie-breaks).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Roster {
    slots: Vec<String>,
    participants: Vec<String>,
    organizer: String,
}

impl Roster {
    pub fn new(
        slots: &[String],
        participants: &[String],
        organizer: &str,
    ) -> Result<Roster, SchedulingError> {
        if slots.is_empty() {
            return Err(SchedulingError::InvalidRoster("no slots".to_string()));
        }
        if participants.is_empty() {
            return Err(SchedulingError::InvalidRoster(
                "no participants".to_string(),
            ));
        }
        check_names("slot", slots)?;
        check_names("participant", participants)?;
        if !participants.iter().any(|p| p == organizer) {
            return Err(SchedulingError::InvalidRoster(format!(
                "organizer {:?} is not one of the participants",
                organizer
            )));
        }
        Ok(Roster {
            slots: slots.to_vec(),
            participants: participants.to_vec(),
            organizer: organizer.to_string(),
        })
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn organizer(&self) -> &str {
        &self.organizer
    }
}

fn check_names(kind: &str, names: &[String]) -> Result<(), SchedulingError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for n in names.iter() {
        if n.trim().is_empty() {
            return Err(SchedulingError::InvalidRoster(format!("empty {} name", kind)));
        }
        // Persisted tables are read back with surrounding whitespace trimmed.
        if n.trim() != n {
            return Err(SchedulingError::InvalidRoster(format!(
                "{} {:?} has leading or trailing whitespace",
                kind, n
            )));
        }
        if !seen.insert(n.as_str()) {
            return Err(SchedulingError::InvalidRoster(format!(
                "duplicate {} {:?}",
                kind, n
            )));
        }
    }
    Ok(())
}

/// The availability of every participant for every slot.
///
/// The grid is always dense: `cells[slot][participant]`, in roster order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AvailabilityTable {
    roster: Roster,
    cells: Vec<Vec<Weight>>,
}

impl AvailabilityTable {
    /// A table where nobody is available anywhere.
    pub fn empty(roster: &Roster) -> AvailabilityTable {
        AvailabilityTable {
            roster: roster.clone(),
            cells: vec![vec![Weight::Unavailable; roster.participants.len()]; roster.slots.len()],
        }
    }

    /// Builds a table from rows given in roster order.
    pub fn from_rows(
        roster: &Roster,
        rows: Vec<Vec<Weight>>,
    ) -> Result<AvailabilityTable, SchedulingError> {
        if rows.len() != roster.slots.len() {
            return Err(SchedulingError::Validation(format!(
                "expected {} rows, got {}",
                roster.slots.len(),
                rows.len()
            )));
        }
        for (slot, row) in roster.slots.iter().zip(rows.iter()) {
            if row.len() != roster.participants.len() {
                return Err(SchedulingError::Validation(format!(
                    "slot {:?}: expected {} weights, got {}",
                    slot,
                    roster.participants.len(),
                    row.len()
                )));
            }
        }
        Ok(AvailabilityTable {
            roster: roster.clone(),
            cells: rows,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn slots(&self) -> &[String] {
        &self.roster.slots
    }

    pub fn participants(&self) -> &[String] {
        &self.roster.participants
    }

    pub fn organizer(&self) -> &str {
        &self.roster.organizer
    }

    pub(crate) fn slot_index(&self, slot: &str) -> Option<usize> {
        self.roster.slots.iter().position(|s| s == slot)
    }

    pub(crate) fn participant_index(&self, participant: &str) -> Option<usize> {
        self.roster.participants.iter().position(|p| p == participant)
    }

    pub(crate) fn set_cell(&mut self, slot_idx: usize, participant_idx: usize, w: Weight) {
        self.cells[slot_idx][participant_idx] = w;
    }

    pub fn weight(&self, slot: &str, participant: &str) -> Option<Weight> {
        let sidx = self.slot_index(slot)?;
        let pidx = self.participant_index(participant)?;
        Some(self.cells[sidx][pidx])
    }

    /// The weights of all participants for one slot, in participant order.
    pub fn row(&self, slot: &str) -> Option<&[Weight]> {
        self.slot_index(slot).map(|idx| self.cells[idx].as_slice())
    }

    /// The weights of one participant, in slot order.
    pub fn column(&self, participant: &str) -> Option<Vec<Weight>> {
        let pidx = self.participant_index(participant)?;
        Some(self.cells.iter().map(|row| row[pidx]).collect())
    }

    /// Overwrites the column of a single participant.
    ///
    /// Nothing is modified if the participant is unknown or the length is wrong.
    pub fn set_column(
        &mut self,
        participant: &str,
        weights: &[Weight],
    ) -> Result<(), SchedulingError> {
        let pidx = self.participant_index(participant).ok_or_else(|| {
            SchedulingError::Validation(format!("unknown participant {:?}", participant))
        })?;
        if weights.len() != self.cells.len() {
            return Err(SchedulingError::Validation(format!(
                "expected {} weights for {:?}, got {}",
                self.cells.len(),
                participant,
                weights.len()
            )));
        }
        for (row, w) in self.cells.iter_mut().zip(weights.iter()) {
            row[pidx] = *w;
        }
        Ok(())
    }

    /// (slot, weights) pairs in canonical order.
    pub fn rows(&self) -> impl Iterator<Item = (&String, &[Weight])> {
        self.roster
            .slots
            .iter()
            .zip(self.cells.iter().map(|r| r.as_slice()))
    }
}

// ******** Output data structures *********

/// A slot with its derived score.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoredSlot {
    pub slot: String,
    pub score: f64,
    pub quorum: bool,
}

/// Everything a dashboard shows about the current table.
#[derive(PartialEq, Debug, Clone)]
pub struct ScheduleSummary {
    /// All the slots, in canonical order.
    pub scores: Vec<ScoredSlot>,
    pub best: ScoredSlot,
    pub organizer_present: bool,
    /// The participants that cannot attend the best slot.
    pub absentees: Vec<String>,
}

/// Errors surfaced by the store, the scheduler and the roster checks.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SchedulingError {
    /// Persisted table missing or structurally invalid.
    StorageRead(String),
    /// Persisted table could not be written.
    StorageWrite(String),
    /// A submission was rejected before touching storage.
    Validation(String),
    InvalidRoster(String),
}

impl Error for SchedulingError {}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::StorageRead(m) => write!(f, "cannot read availability table: {}", m),
            SchedulingError::StorageWrite(m) => {
                write!(f, "cannot write availability table: {}", m)
            }
            SchedulingError::Validation(m) => write!(f, "invalid submission: {}", m),
            SchedulingError::InvalidRoster(m) => write!(f, "invalid roster: {}", m),
        }
    }
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScoringRules {
    /// A slot whose score reaches this value is considered viable.
    pub quorum_threshold: f64,
}

impl ScoringRules {
    pub const DEFAULT_QUORUM: f64 = 4.0;

    pub const DEFAULT_RULES: ScoringRules = ScoringRules {
        quorum_threshold: ScoringRules::DEFAULT_QUORUM,
    };
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules::DEFAULT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn roster_accepts_inner_spaces() {
        let roster = Roster::new(&names(&["Fri evening"]), &names(&["Org"]), "Org").unwrap();
        assert_eq!(roster.slots(), &names(&["Fri evening"])[..]);
    }

    #[test]
    fn roster_rejects_padded_names() {
        for slots in [&[" Fri evening"][..], &["Sat "][..], &["A", "\tB"][..]] {
            let res = Roster::new(&names(slots), &names(&["Org"]), "Org");
            assert!(
                matches!(res, Err(SchedulingError::InvalidRoster(_))),
                "accepted {:?}",
                slots
            );
        }
        let res = Roster::new(&names(&["A"]), &names(&["X ", "Org"]), "Org");
        assert!(matches!(res, Err(SchedulingError::InvalidRoster(_))));
    }

    #[test]
    fn roster_rejects_duplicates_and_missing_organizer() {
        let res = Roster::new(&names(&["A", "A"]), &names(&["Org"]), "Org");
        assert!(matches!(res, Err(SchedulingError::InvalidRoster(_))));
        let res = Roster::new(&names(&["A"]), &names(&["X"]), "Org");
        assert!(matches!(res, Err(SchedulingError::InvalidRoster(_))));
    }
}
