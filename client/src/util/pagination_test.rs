use super::*;

#[test]
fn empty_list_has_one_page() {
    let page = Page::new(0, 0, PAGE_SIZE);
    assert_eq!(page.count, 1);
    assert_eq!((page.start, page.end), (0, 0));
    assert_eq!(page.label(), "No records");
    assert!(!page.has_prev());
    assert!(!page.has_next());
}

#[test]
fn count_rounds_up() {
    assert_eq!(Page::new(10, 0, PAGE_SIZE).count, 1);
    assert_eq!(Page::new(11, 0, PAGE_SIZE).count, 2);
    assert_eq!(Page::new(42, 0, PAGE_SIZE).count, 5);
}

#[test]
fn index_is_clamped() {
    let page = Page::new(42, 99, PAGE_SIZE);
    assert_eq!(page.index, 4);
    assert_eq!((page.start, page.end), (40, 42));
    assert_eq!(page.label(), "Showing 41-42 of 42");
    assert!(page.has_prev());
    assert!(!page.has_next());
}

#[test]
fn slice_returns_current_rows() {
    let rows: Vec<u32> = (0..25).collect();
    let page = Page::new(rows.len(), 1, PAGE_SIZE);
    assert_eq!(page.slice(&rows), &rows[10..20]);
    assert_eq!(page.label(), "Showing 11-20 of 25");
}

#[test]
fn zero_size_is_treated_as_one() {
    let page = Page::new(3, 2, 0);
    assert_eq!(page.count, 3);
    assert_eq!((page.start, page.end), (2, 3));
}
