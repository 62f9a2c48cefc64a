/// One page of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page actually served.
    pub page: usize,
    pub total_pages: usize,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice `results` into the 1-based `page`. Pages past the end are empty; page 0 is page 1.
pub fn paginate<T>(results: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let size = page_size.max(1);
    let page = page.max(1);
    let start = ((page - 1).saturating_mul(size)).min(results.len());
    let end = start.saturating_add(size).min(results.len());
    Page { items: &results[start..end], page, total_pages: total_pages(results.len(), size) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous,
    Page { number: usize, active: bool },
    Ellipsis,
    Next,
}

/// Page-button layout: first, last and neighbours of `current` are shown; a gap next to the
/// neighbourhood collapses into one ellipsis. Empty when there is at most one page.
pub fn page_controls(current: usize, total: usize) -> Vec<PageControl> {
    if total <= 1 { return Vec::new(); }
    let mut out = Vec::new();
    if current > 1 { out.push(PageControl::Previous); }
    for i in 1..=total {
        if i == 1 || i == total || i.abs_diff(current) <= 1 {
            out.push(PageControl::Page { number: i, active: i == current });
        } else if (i + 2 == current && current > 3) || (i == current + 2 && current + 2 < total) {
            out.push(PageControl::Ellipsis);
        }
    }
    if current < total { out.push(PageControl::Next); }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageControl::{Ellipsis, Next, Previous};

    fn p(number: usize, active: bool) -> PageControl { PageControl::Page { number, active } }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn third_page_of_twelve() {
        let results: Vec<u32> = (1..=12).collect();
        let page = paginate(&results, 3, 5);
        assert_eq!(page.items, &[11, 12]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn pages_reconstruct_the_input() {
        for n in [0usize, 1, 4, 5, 6, 23] {
            for size in [1usize, 3, 5, 10] {
                let results: Vec<usize> = (0..n).collect();
                let total = total_pages(n, size);
                let joined: Vec<usize> = (1..=total).flat_map(|p| paginate(&results, p, size).items.to_vec()).collect();
                assert_eq!(joined, results, "n={} size={}", n, size);
            }
        }
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let results = [1, 2, 3];
        assert!(paginate(&results, 9, 2).items.is_empty());
        assert_eq!(paginate(&results, 0, 2).items, &[1, 2]);
    }

    #[test]
    fn single_page_has_no_controls() {
        assert!(page_controls(1, 1).is_empty());
        assert!(page_controls(1, 0).is_empty());
    }

    #[test]
    fn first_page_of_many() {
        assert_eq!(page_controls(1, 10), vec![p(1, true), p(2, false), Ellipsis, p(10, false), Next]);
    }

    #[test]
    fn middle_page_has_ellipses_on_both_sides() {
        assert_eq!(
            page_controls(5, 10),
            vec![Previous, p(1, false), Ellipsis, p(4, false), p(5, true), p(6, false), Ellipsis, p(10, false), Next]
        );
    }

    #[test]
    fn last_page_of_many() {
        assert_eq!(page_controls(10, 10), vec![Previous, p(1, false), Ellipsis, p(9, false), p(10, true)]);
    }

    #[test]
    fn small_gaps_are_left_alone() {
        // page 3: the page before the neighbourhood is page 1 itself, so no ellipsis.
        assert_eq!(page_controls(3, 5), vec![Previous, p(1, false), p(2, false), p(3, true), p(4, false), p(5, false), Next]);
        assert_eq!(page_controls(2, 3), vec![Previous, p(1, false), p(2, true), p(3, false), Next]);
    }
}
