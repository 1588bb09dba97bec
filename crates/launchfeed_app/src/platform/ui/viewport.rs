/// Whether the last of `heights` lies fully inside a viewport of
/// `viewport` rows whose first rendered item is `offset`.
pub fn last_item_fully_visible(heights: &[usize], offset: usize, viewport: usize) -> bool {
    let Some(last) = heights.len().checked_sub(1) else {
        return false;
    };
    if offset > last {
        return false;
    }
    heights[offset..].iter().sum::<usize>() <= viewport
}

#[cfg(test)]
mod tests {
    use super::last_item_fully_visible;

    #[test]
    fn short_list_shows_its_tail() {
        assert!(last_item_fully_visible(&[1, 1, 1], 0, 10));
    }

    #[test]
    fn tail_below_the_fold_is_hidden() {
        let heights = vec![1; 30];
        assert!(!last_item_fully_visible(&heights, 0, 20));
        assert!(last_item_fully_visible(&heights, 10, 20));
        assert!(!last_item_fully_visible(&heights, 9, 20));
    }

    #[test]
    fn partially_visible_tail_does_not_count() {
        // Expanded rows take several lines; the sentinel only half fits.
        assert!(!last_item_fully_visible(&[4, 4, 3, 2], 0, 12));
        assert!(last_item_fully_visible(&[4, 4, 3, 2], 1, 12));
    }

    #[test]
    fn empty_list_has_no_tail() {
        assert!(!last_item_fully_visible(&[], 0, 10));
        assert!(!last_item_fully_visible(&[1], 3, 10));
    }
}
