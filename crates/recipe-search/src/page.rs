/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_results: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Slice `items` for a 1-indexed `page` of `limit` entries. Pages past
/// the end yield an empty slice; `total_pages` is `ceil(total / limit)`.
pub fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Page<T> {
    let total_results = items.len();
    let total_pages = if limit == 0 {
        0
    } else {
        (total_results + limit - 1) / limit
    };
    let current_page = page.max(1);
    let start = (current_page - 1).saturating_mul(limit).min(total_results);
    let end = start.saturating_add(limit).min(total_results);
    Page {
        items: items[start..end].to_vec(),
        total_results,
        total_pages,
        current_page,
    }
}
