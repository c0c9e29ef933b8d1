use thiserror::Error;

use crate::{PAGE_SIZE, TABLE_MAX_PAGES};

/// One fixed-size in-memory page. Rows are packed at arithmetic offsets and
/// unused bytes stay zero.
#[derive(Debug)]
pub struct Page {
    buffer: [u8; PAGE_SIZE],
}

impl Page {
    fn zeroed() -> Self {
        Self {
            buffer: [0u8; PAGE_SIZE],
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagerError {
    /// Requested page index past `TABLE_MAX_PAGES`. Unreachable while the
    /// table enforces its row-count cap; surfacing it means the capacity
    /// constants disagree and the process must not continue.
    #[error("page {0} is out of bounds (max pages {TABLE_MAX_PAGES})")]
    OutOfBounds(usize),
}

/// Fixed arena of lazily allocated pages.
///
/// Pages are boxed so an idle table costs one pointer per slot rather than
/// the full page buffer.
pub struct Pager {
    pages: [Option<Box<Page>>; TABLE_MAX_PAGES],
}

impl Pager {
    pub fn new() -> Self {
        Self {
            pages: [const { None }; TABLE_MAX_PAGES],
        }
    }

    /// Returns the page at `page_num`, allocating a zeroed buffer on first
    /// use.
    pub fn page(&mut self, page_num: usize) -> Result<&mut Page, PagerError> {
        let slot = self
            .pages
            .get_mut(page_num)
            .ok_or(PagerError::OutOfBounds(page_num))?;
        Ok(slot.get_or_insert_with(|| Box::new(Page::zeroed())))
    }

    /// Number of pages allocated so far.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}
