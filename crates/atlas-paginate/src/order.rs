//! Page order for printing
//!
//! `None` entries are blank placeholders: they take a position in the
//! printed sequence but are never rendered.

use log::{info, warn};

use crate::constants::PAGES_PER_SHEET;
use crate::page::Page;
use crate::types::PageOrder;

/// Rearrange `items` for printing in `order`
pub fn reorder<T>(items: Vec<T>, order: PageOrder) -> Vec<Option<T>> {
    let mut items: Vec<Option<T>> = items.into_iter().map(Some).collect();

    match order {
        PageOrder::Natural => {}
        PageOrder::RectoVerso => {
            // Second half goes between the pages of the first half
            let mut old = items.len() / 2;
            let mut new = 1;
            while old < items.len() {
                move_item(&mut items, old, new);
                old += 1;
                new += 2;
            }
        }
        PageOrder::Book => {
            let padding = blank_pages_needed(items.len(), order);
            items.extend((0..padding).map(|_| None));

            // Interleave from the back: 1 n 2 n-1 ...
            let old = items.len().saturating_sub(1);
            let mut new = 1;
            while new < old {
                move_item(&mut items, old, new);
                new += 2;
            }

            // Swap every first pair of a sheet for printing over the short edge
            let mut old = 0;
            let mut new = 1;
            while old < items.len() {
                move_item(&mut items, old, new);
                old += PAGES_PER_SHEET;
                new += PAGES_PER_SHEET;
            }
        }
    }

    items
}

/// Number of blank placeholders `order` adds to `count` pages
pub fn blank_pages_needed(count: usize, order: PageOrder) -> usize {
    match order {
        PageOrder::Book => (PAGES_PER_SHEET - count % PAGES_PER_SHEET) % PAGES_PER_SHEET,
        PageOrder::Natural | PageOrder::RectoVerso => 0,
    }
}

/// Reorder finished pages and log the resulting sequence
pub fn reorder_pages(pages: Vec<Page>, order: PageOrder) -> Vec<Option<Page>> {
    let ordered = reorder(pages, order);

    if order == PageOrder::Natural {
        info!("Page order is {}", order);
    } else {
        let sequence: Vec<String> = ordered
            .iter()
            .map(|page| match page {
                Some(page) => page.index().to_string(),
                None => "X".to_string(),
            })
            .collect();
        info!("Page order is {}, new order = {}", order, sequence.join(" "));
    }

    if ordered.iter().any(Option::is_none) {
        warn!("Blank pages are not generated!");
    }

    ordered
}

/// Remove the item at `from` and insert it at `to`, clamped to the end
fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_item_clamps_to_end() {
        let mut items = vec![1];
        move_item(&mut items, 0, 1);
        assert_eq!(items, vec![1]);

        let mut items = vec![1, 2, 3];
        move_item(&mut items, 0, 5);
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn test_blank_pages_needed() {
        assert_eq!(blank_pages_needed(3, PageOrder::Book), 1);
        assert_eq!(blank_pages_needed(4, PageOrder::Book), 0);
        assert_eq!(blank_pages_needed(5, PageOrder::Book), 3);
        assert_eq!(blank_pages_needed(5, PageOrder::RectoVerso), 0);
    }
}
