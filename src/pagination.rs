//! Page navigation for admin listings.

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Pages shown at each end of the navigation.
const EDGE: usize = 2;
/// Pages shown on each side of the current one.
const AROUND: usize = 3;

/// Page links where `None` marks a gap.
fn page_links(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    let mut links = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total_pages {
        let near_edge = page <= EDGE || page + EDGE > total_pages;
        let near_current = page + AROUND >= current && page <= current + AROUND;
        if !(near_edge || near_current) {
            continue;
        }
        if page > last_shown + 1 {
            links.push(None);
        }
        links.push(Some(page));
        last_shown = page;
    }
    links
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    /// Wraps one page of `items` out of `total` matching rows.
    pub fn new(items: Vec<T>, current_page: usize, total: usize) -> Self {
        let page = current_page.max(1);
        let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
        Self {
            items,
            pages: page_links(total_pages, page),
            page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pages_for_empty_listing() {
        assert!(page_links(0, 1).is_empty());
    }

    #[test]
    fn short_listing_has_no_gaps() {
        assert_eq!(page_links(4, 2), vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn gaps_around_current_page() {
        let links = page_links(30, 15);
        assert_eq!(
            links,
            vec![
                Some(1),
                Some(2),
                None,
                Some(12),
                Some(13),
                Some(14),
                Some(15),
                Some(16),
                Some(17),
                Some(18),
                None,
                Some(29),
                Some(30)
            ]
        );
    }

    #[test]
    fn page_zero_is_first_page() {
        let page: Paginated<u8> = Paginated::new(vec![], 0, 45);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages.len(), 3);
    }
}
