use atlas_paginate::*;

fn numbered(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

fn show(items: &[Option<usize>]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            Some(index) => index.to_string(),
            None => "X".to_string(),
        })
        .collect()
}

#[test]
fn test_natural_order_unchanged() {
    let ordered = reorder(numbered(5), PageOrder::Natural);
    assert_eq!(show(&ordered), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn test_rectoverso_four_pages() {
    let ordered = reorder(numbered(4), PageOrder::RectoVerso);
    assert_eq!(show(&ordered), vec!["1", "3", "2", "4"]);
}

#[test]
fn test_rectoverso_odd_count() {
    let ordered = reorder(numbered(5), PageOrder::RectoVerso);
    assert_eq!(show(&ordered), vec!["1", "3", "2", "4", "5"]);
}

#[test]
fn test_rectoverso_single_page() {
    let ordered = reorder(numbered(1), PageOrder::RectoVerso);
    assert_eq!(show(&ordered), vec!["1"]);
}

#[test]
fn test_book_three_pages() {
    let ordered = reorder(numbered(3), PageOrder::Book);
    assert_eq!(show(&ordered), vec!["X", "1", "2", "3"]);
}

#[test]
fn test_book_four_pages() {
    let ordered = reorder(numbered(4), PageOrder::Book);
    assert_eq!(show(&ordered), vec!["4", "1", "2", "3"]);
}

#[test]
fn test_book_eight_pages() {
    let ordered = reorder(numbered(8), PageOrder::Book);
    assert_eq!(
        show(&ordered),
        vec!["8", "1", "2", "7", "6", "3", "4", "5"]
    );
}

#[test]
fn test_book_padding_keeps_pages() {
    for n in 1..=13 {
        let ordered = reorder(numbered(n), PageOrder::Book);

        let blanks = ordered.iter().filter(|item| item.is_none()).count();
        assert_eq!(blanks, (4 - n % 4) % 4);
        assert_eq!(ordered.len() % 4, 0);

        let mut pages: Vec<usize> = ordered.into_iter().flatten().collect();
        pages.sort_unstable();
        assert_eq!(pages, numbered(n));
    }
}

#[test]
fn test_reorder_pages_keeps_indices() {
    let options = PaginationOptions::default();
    let pages: Vec<Page> = (1..=3)
        .map(|i| PageBuilder::start(i, &options, Coordinate::new(i as f64, 0.0)).finish())
        .collect();

    let ordered = reorder_pages(pages, PageOrder::Book);
    let indices: Vec<Option<usize>> = ordered
        .iter()
        .map(|page| page.as_ref().map(Page::index))
        .collect();
    assert_eq!(indices, vec![None, Some(1), Some(2), Some(3)]);
}

#[test]
fn test_page_order_names() {
    assert_eq!(PageOrder::Natural.to_string(), "naturalorder");
    assert_eq!("rectoverso".parse::<PageOrder>().unwrap(), PageOrder::RectoVerso);
    assert_eq!("book".parse::<PageOrder>().unwrap(), PageOrder::Book);
    assert!("booklet".parse::<PageOrder>().is_err());
}
