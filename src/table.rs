use thiserror::Error;
use tracing::debug;

use crate::pager::{Pager, PagerError};
use crate::row::{Row, deserialize_row, serialize_row};
use crate::{ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_ROWS};

#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The table already holds `TABLE_MAX_ROWS` rows. Reported per command;
    /// the session keeps running.
    #[error("Table full.")]
    TableFull,
    /// Internal fault in the page arena; the session must stop.
    #[error(transparent)]
    Pager(#[from] PagerError),
}

/// The single table: a row count plus the page arena backing it.
///
/// Created empty at startup, exclusively owned by the session loop, and
/// dropped when the loop returns.
pub struct Table {
    row_count: usize,
    pager: Pager,
}

impl Table {
    pub fn new() -> Self {
        Self {
            row_count: 0,
            pager: Pager::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Appends `row` at the next free slot. Once the table holds
    /// `TABLE_MAX_ROWS` rows this fails without touching storage; a row is
    /// never partially visible.
    pub fn insert_row(&mut self, row: &Row) -> Result<(), ExecuteError> {
        if self.row_count == TABLE_MAX_ROWS {
            return Err(ExecuteError::TableFull);
        }

        let bytes = serialize_row(row);
        let (page_num, byte_offset) = slot_location(self.row_count);
        let page = self.pager.page(page_num)?;
        page.as_mut_slice()[byte_offset..byte_offset + ROW_SIZE].copy_from_slice(&bytes);
        self.row_count += 1;
        debug!(
            row_count = self.row_count,
            pages = self.pager.allocated_pages(),
            "row inserted"
        );
        Ok(())
    }

    /// Rows in insertion order. Each call is a fresh traversal of slots
    /// `0..row_count`.
    pub fn scan(&mut self) -> Result<Vec<Row>, ExecuteError> {
        let mut rows = Vec::with_capacity(self.row_count);
        for slot in 0..self.row_count {
            let (page_num, byte_offset) = slot_location(slot);
            let page = self.pager.page(page_num)?;
            let mut buf = [0u8; ROW_SIZE];
            buf.copy_from_slice(&page.as_slice()[byte_offset..byte_offset + ROW_SIZE]);
            rows.push(deserialize_row(&buf));
        }
        Ok(rows)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_location(slot: usize) -> (usize, usize) {
    (slot / ROWS_PER_PAGE, (slot % ROWS_PER_PAGE) * ROW_SIZE)
}
