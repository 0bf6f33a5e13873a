// Reading and writing the availability table as CSV.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use party_scheduling::*;

use crate::sched::*;

/// The label of the row-key column.
pub const SLOT_COLUMN: &str = "Slot";

/// Stores the table in a CSV file: one row per slot, one column per participant.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: PathBuf) -> CsvStorage {
        CsvStorage { path }
    }
}

impl TableStorage for CsvStorage {
    fn load(&self, roster: &Roster) -> Result<Option<AvailabilityTable>, SchedulingError> {
        if !self.path.exists() {
            debug!("CsvStorage::load: {:?} does not exist", self.path);
            return Ok(None);
        }
        read_csv_table(&self.path, roster).map(Some)
    }

    fn save(&mut self, table: &AvailabilityTable) -> Result<(), SchedulingError> {
        write_csv_table(&self.path, table)
    }
}

fn read_error(path: &Path, msg: impl Display) -> SchedulingError {
    warn!("read_csv_table: {}: {}", path.display(), msg);
    SchedulingError::StorageRead(format!("{}: {}", path.display(), msg))
}

fn write_error(path: &Path, msg: impl Display) -> SchedulingError {
    warn!("write_csv_table: {}: {}", path.display(), msg);
    SchedulingError::StorageWrite(format!("{}: {}", path.display(), msg))
}

/// Reads a table and puts it back in roster order.
///
/// Rows and columns may come in any order, but they must match the roster exactly.
pub fn read_csv_table(path: &Path, roster: &Roster) -> Result<AvailabilityTable, SchedulingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| read_error(path, e))?;

    let header = rdr.headers().map_err(|e| read_error(path, e))?.clone();
    debug!("read_csv_table: header: {:?}", header);
    match header.get(0) {
        Some(SLOT_COLUMN) => {}
        x => {
            return Err(read_error(
                path,
                format!("first column must be {:?}, found {:?}", SLOT_COLUMN, x),
            ))
        }
    }

    // Column position in the file -> participant position in the roster.
    let participant_idx: HashMap<&str, usize> = roster
        .participants()
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.as_str(), idx))
        .collect();
    let mut col_to_participant: Vec<usize> = Vec::new();
    let mut seen_participants: Vec<bool> = vec![false; roster.participants().len()];
    for name in header.iter().skip(1) {
        let pidx = *participant_idx
            .get(name)
            .ok_or_else(|| read_error(path, format!("unexpected column {:?}", name)))?;
        if seen_participants[pidx] {
            return Err(read_error(path, format!("duplicate column {:?}", name)));
        }
        seen_participants[pidx] = true;
        col_to_participant.push(pidx);
    }
    if let Some(pidx) = seen_participants.iter().position(|seen| !seen) {
        return Err(read_error(
            path,
            format!("missing column {:?}", roster.participants()[pidx]),
        ));
    }

    let slot_idx: HashMap<&str, usize> = roster
        .slots()
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.as_str(), idx))
        .collect();
    let mut rows: Vec<Option<Vec<Weight>>> = vec![None; roster.slots().len()];

    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.map_err(|e| read_error(path, e))?;
        debug!("read_csv_table: {:?} {:?}", lineno, line);
        let slot = line
            .get(0)
            .ok_or_else(|| read_error(path, format!("line {}: empty line", lineno)))?;
        let sidx = *slot_idx.get(slot).ok_or_else(|| {
            read_error(path, format!("line {}: unknown slot {:?}", lineno, slot))
        })?;
        if rows[sidx].is_some() {
            return Err(read_error(
                path,
                format!("line {}: duplicate slot {:?}", lineno, slot),
            ));
        }

        let mut weights: Vec<Weight> = vec![Weight::Unavailable; roster.participants().len()];
        for (col, cell) in line.iter().skip(1).enumerate() {
            let w = parse_cell(cell).ok_or_else(|| {
                read_error(
                    path,
                    format!(
                        "line {}: {:?} is not one of 0.0, 0.5, 1.0 (column {:?})",
                        lineno,
                        cell,
                        header.get(col + 1).unwrap_or_default()
                    ),
                )
            })?;
            weights[col_to_participant[col]] = w;
        }
        rows[sidx] = Some(weights);
    }

    let mut dense_rows: Vec<Vec<Weight>> = Vec::new();
    for (slot, row) in roster.slots().iter().zip(rows.into_iter()) {
        match row {
            Some(r) => dense_rows.push(r),
            None => return Err(read_error(path, format!("missing slot {:?}", slot))),
        }
    }
    AvailabilityTable::from_rows(roster, dense_rows).map_err(|e| read_error(path, e))
}

fn parse_cell(cell: &str) -> Option<Weight> {
    cell.parse::<f64>().ok().and_then(Weight::from_value)
}

pub fn write_csv_table(path: &Path, table: &AvailabilityTable) -> Result<(), SchedulingError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;

    let mut header: Vec<&str> = vec![SLOT_COLUMN];
    header.extend(table.participants().iter().map(|p| p.as_str()));
    wtr.write_record(&header).map_err(|e| write_error(path, e))?;

    for (slot, weights) in table.rows() {
        let mut record: Vec<String> = vec![slot.clone()];
        record.extend(weights.iter().map(|w| w.to_string()));
        wtr.write_record(&record).map_err(|e| write_error(path, e))?;
    }
    wtr.flush().map_err(|e| write_error(path, e))?;
    debug!("write_csv_table: wrote {:?}", path);
    Ok(())
}
