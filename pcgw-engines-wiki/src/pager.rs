//! Offset/limit pagination over an unbounded remote result set.

use crate::error::WikiError;

/// One page-at-a-time view of a remote query.
pub trait PageSource {
    type Record;

    /// Fetch up to `limit` records starting at `offset`.
    ///
    /// Returning fewer than `limit` records tells the pager the result set is
    /// exhausted, so a source must never shorten a page for any other reason
    /// (filtering, parse failures); those belong after pagination or in an
    /// error.
    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Self::Record>, WikiError>;
}

/// Fetch every page of `source` in order and concatenate them.
///
/// Stops after the first page shorter than `page_size`, including an empty
/// first page. Any page error aborts the whole fetch.
pub fn fetch_all<S: PageSource>(source: &mut S, page_size: usize) -> Result<Vec<S::Record>, WikiError> {
    if page_size == 0 {
        return Err(WikiError::config("page size must be at least 1"));
    }

    let mut records = Vec::new();
    let mut offset = 0;
    loop {
        let page = source.fetch_page(offset, page_size)?;
        let len = page.len();
        log::debug!("Fetched {len} records at offset {offset}");
        records.extend(page);
        if len < page_size {
            break;
        }
        offset += page_size;
    }

    Ok(records)
}

#[cfg(test)]
#[path = "tests/pager_tests.rs"]
mod tests;
