//! Page type and the pagination step.

use crate::model::Row;

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// What the fetcher does after absorbing a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    /// Request the next page at this offset.
    Continue { offset: usize },
    /// The dataset has no more matching rows.
    Done,
}

/// Decides the next step from the previous offset and the size of the page it returned.
///
/// A full page means there may be more rows; an empty or short page is the exhaustion
/// signal.
///
/// ```
/// use acris_lib::api::query::{next_step, PageStep};
///
/// assert_eq!(next_step(0, 1000, 1000), PageStep::Continue { offset: 1000 });
/// assert_eq!(next_step(1000, 400, 1000), PageStep::Done);
/// assert_eq!(next_step(2000, 0, 1000), PageStep::Done);
/// ```
pub fn next_step(offset: usize, page_len: usize, page_size: usize) -> PageStep {
    if page_len == 0 || page_len < page_size {
        PageStep::Done
    } else {
        PageStep::Continue {
            offset: offset + page_size,
        }
    }
}

/// One page of rows from a single request.
#[derive(Debug, Clone)]
pub struct Page {
    rows: Vec<Row>,
    offset: usize,
    requested: usize,
}

impl Page {
    /// Creates a page fetched at `offset` with `requested` as the page size.
    pub fn new(rows: Vec<Row>, offset: usize, requested: usize) -> Self {
        Self {
            rows,
            offset,
            requested,
        }
    }

    /// Returns a reference to the rows in this page.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the offset this page was fetched at.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns the step that follows this page.
    pub fn next_step(&self) -> PageStep {
        next_step(self.offset, self.rows.len(), self.requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_over_page_sizes() {
        // (page sizes returned, expected requests, expected rows)
        let cases: [(&[usize], usize, usize); 4] = [
            (&[1000, 1000, 400], 3, 2400),
            (&[1000, 1000, 1000, 0], 4, 3000),
            (&[0], 1, 0),
            (&[999], 1, 999),
        ];

        for (sizes, expected_requests, expected_rows) in cases {
            let mut offset = 0;
            let mut requests = 0;
            let mut rows = 0;
            for &len in sizes {
                requests += 1;
                rows += len;
                match next_step(offset, len, DEFAULT_PAGE_SIZE) {
                    PageStep::Continue { offset: next } => offset = next,
                    PageStep::Done => break,
                }
            }
            assert_eq!(requests, expected_requests, "{:?}", sizes);
            assert_eq!(rows, expected_rows, "{:?}", sizes);
        }
    }

    #[test]
    fn test_page_step() {
        let page = Page::new(vec![Row::new(); 10], 20, 10);
        assert_eq!(page.next_step(), PageStep::Continue { offset: 30 });
        assert_eq!(page.offset(), 20);

        let page = Page::new(vec![Row::new(); 3], 20, 10);
        assert_eq!(page.next_step(), PageStep::Done);
    }
}
