use log::{debug, info};

use crate::config::*;

/// Durable load/save of an availability table.
///
/// `load` distinguishes three outcomes:
/// * `Ok(None)`: nothing has been persisted yet
/// * `Err(SchedulingError::StorageRead(_))`: something is persisted but it is not a valid table
/// * `Ok(Some(table))`: a valid table, in the roster's canonical order
pub trait TableStorage {
    fn load(&self, roster: &Roster) -> Result<Option<AvailabilityTable>, SchedulingError>;

    fn save(&mut self, table: &AvailabilityTable) -> Result<(), SchedulingError>;
}

/// Keeps the table in memory. Useful for tests and for embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    table: Option<AvailabilityTable>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub fn with_table(table: AvailabilityTable) -> MemoryStorage {
        MemoryStorage {
            table: Some(table),
            read_only: false,
        }
    }

    /// A storage holding `table` on which every save fails.
    pub fn failing_writes(table: AvailabilityTable) -> MemoryStorage {
        MemoryStorage {
            table: Some(table),
            read_only: true,
        }
    }
}

impl TableStorage for MemoryStorage {
    fn load(&self, roster: &Roster) -> Result<Option<AvailabilityTable>, SchedulingError> {
        match &self.table {
            None => Ok(None),
            Some(t) if t.roster() != roster => Err(SchedulingError::StorageRead(
                "stored table does not match the roster".to_string(),
            )),
            Some(t) => Ok(Some(t.clone())),
        }
    }

    fn save(&mut self, table: &AvailabilityTable) -> Result<(), SchedulingError> {
        if self.read_only {
            return Err(SchedulingError::StorageWrite(
                "memory storage is read-only".to_string(),
            ));
        }
        self.table = Some(table.clone());
        Ok(())
    }
}

/// The sole source of truth for the availability table.
///
/// There is no locking: two concurrent `save_column` calls resolve as last-writer-wins
/// on the whole table. Each call reloads the persisted table right before writing,
/// so only an interleaving inside a single call can drop another participant's column.
pub struct AvailabilityStore<S: TableStorage> {
    roster: Roster,
    storage: S,
}

impl<S: TableStorage> AvailabilityStore<S> {
    pub fn new(roster: Roster, storage: S) -> AvailabilityStore<S> {
        AvailabilityStore { roster, storage }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Creates and persists an empty table if none exists yet.
    ///
    /// Returns true if a table was created. A malformed persisted table is
    /// not replaced: the read error is returned instead.
    pub fn initialize_if_absent(&mut self) -> Result<bool, SchedulingError> {
        if self.storage.load(&self.roster)?.is_some() {
            debug!("initialize_if_absent: table already present");
            return Ok(false);
        }
        let table = AvailabilityTable::empty(&self.roster);
        self.storage.save(&table)?;
        info!(
            "Created empty availability table ({} slots x {} participants)",
            self.roster.slots().len(),
            self.roster.participants().len()
        );
        Ok(true)
    }

    pub fn load(&self) -> Result<AvailabilityTable, SchedulingError> {
        self.storage
            .load(&self.roster)?
            .ok_or_else(|| SchedulingError::StorageRead("no table has been persisted".to_string()))
    }

    /// Replaces the column of one participant and persists the whole table.
    pub fn save_column(
        &mut self,
        participant: &str,
        weights: &[Weight],
    ) -> Result<(), SchedulingError> {
        let mut table = self.load()?;
        table.set_column(participant, weights)?;
        self.storage.save(&table)?;
        debug!("save_column: {} -> {:?}", participant, weights);
        Ok(())
    }
}
