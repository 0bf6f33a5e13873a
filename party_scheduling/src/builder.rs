pub use crate::config::*;

/// A builder for filling a table by hand, one slot at a time.
///
/// Mostly useful in tests and for seeding a store.
///
/// ```
/// use party_scheduling::builder::TableBuilder;
/// use party_scheduling::compute_score;
/// # use party_scheduling::SchedulingError;
///
/// let table = TableBuilder::new(&["Fri evening", "Sat morning"], &["Anna", "Bob"], "Bob")?
///     .row("Fri evening", &[1.0, 0.5])?
///     .build();
///
/// assert_eq!(compute_score(&table, "Fri evening"), Some(1.0));
/// assert_eq!(compute_score(&table, "Sat morning"), Some(0.0));
///
/// # Ok::<(), SchedulingError>(())
/// ```
pub struct TableBuilder {
    _table: AvailabilityTable,
}

impl TableBuilder {
    pub fn new(
        slots: &[&str],
        participants: &[&str],
        organizer: &str,
    ) -> Result<TableBuilder, SchedulingError> {
        let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        let participants: Vec<String> = participants.iter().map(|s| s.to_string()).collect();
        let roster = Roster::new(&slots, &participants, organizer)?;
        Ok(TableBuilder::from_roster(&roster))
    }

    pub fn from_roster(roster: &Roster) -> TableBuilder {
        TableBuilder {
            _table: AvailabilityTable::empty(roster),
        }
    }

    pub fn roster(&self) -> &Roster {
        self._table.roster()
    }

    /// Sets the weights of every participant for one slot, in participant order.
    pub fn row(mut self, slot: &str, values: &[f64]) -> Result<TableBuilder, SchedulingError> {
        let num_participants = self._table.participants().len();
        if values.len() != num_participants {
            return Err(SchedulingError::Validation(format!(
                "slot {:?}: expected {} values, got {}",
                slot,
                num_participants,
                values.len()
            )));
        }
        let sidx = self._table.slot_index(slot).ok_or_else(|| {
            SchedulingError::Validation(format!("unknown slot {:?}", slot))
        })?;
        for (pidx, x) in values.iter().enumerate() {
            let w = Weight::from_value(*x).ok_or_else(|| {
                SchedulingError::Validation(format!("{} is not one of 0.0, 0.5, 1.0", x))
            })?;
            self._table.set_cell(sidx, pidx, w);
        }
        Ok(self)
    }

    pub fn build(self) -> AvailabilityTable {
        self._table
    }
}
