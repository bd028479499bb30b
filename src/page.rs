//! Pagination math for the gallery page.
//!
//! A [`PageView`] is the ephemeral, per-request value the renderer works
//! from: the clamped page number, the totals, and the window of filenames
//! for that page. It is computed fresh for every request and discarded.
//!
//! [`paginate`] is total over all inputs. Page requests arrive from the
//! query string as arbitrary integers; negative, zero, and absurdly large
//! values clamp into `[1, total_pages]` rather than erroring.

/// The slice of the listing rendered for one request.
#[derive(Debug, PartialEq)]
pub struct PageView<'a> {
    /// Clamped 1-based page number.
    pub page: usize,
    /// Total number of images in the listing.
    pub total: usize,
    /// Total number of pages, at least 1 even for an empty listing.
    pub total_pages: usize,
    /// Filenames on this page, in listing order.
    pub files: &'a [String],
}

/// `max(1, ceil(total / page_size))`. A `page_size` of zero is treated as
/// a single degenerate page; config validation rejects it before it can
/// reach a running server.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Compute the page view for `requested` over an already-sorted listing.
pub fn paginate(files: &[String], requested: i64, page_size: usize) -> PageView<'_> {
    let total = files.len();
    let pages = total_pages(total, page_size);
    let page = requested.clamp(1, pages as i64) as usize;

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    PageView {
        page,
        total,
        total_pages: pages,
        files: &files[start..end],
    }
}
