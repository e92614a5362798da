//! Tests for the query engine
//!
//! These tests verify:
//! - Page slicing and totals
//! - Stable sorting in both directions
//! - Sort parameter parsing
//! - Free-text and per-field search

use masterblog::query::{
    list_page, paginate, search_posts, sort_posts, PageRequest, SearchFilter, SortDirection,
    SortSpec,
};
use masterblog::{BlogError, Post, PostField};

// =============================================================================
// Helper Functions
// =============================================================================

fn post(id: u64, title: &str, author: &str, date: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: format!("Notes on {}", title),
        author: author.to_string(),
        date: date.to_string(),
    }
}

fn numbered(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|i| post(i, &format!("Post {}", i), "Anatoly Karpov", "2025-01-01"))
        .collect()
}

fn ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}

fn sample() -> Vec<Post> {
    vec![
        post(1, "Rook Endgames", "Magnus Carlsen", "2025-02-10"),
        post(2, "Chess History", "Garry Kasparov", "2025-01-05"),
        post(3, "Queen Sacrifices", "Bobby Fischer", "2025-02-10"),
        post(4, "Blindfold Chess", "Magnus Carlsen", "2024-12-24"),
    ]
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[test]
fn test_first_page() {
    let posts = numbered(12);

    let page = paginate(&posts, PageRequest::new(1, 5).unwrap());

    assert_eq!(ids(&page.posts), vec![1, 2, 3, 4, 5]);
    assert_eq!(page.total_posts, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 5);
}

#[test]
fn test_last_partial_page() {
    let posts = numbered(12);

    let page = paginate(&posts, PageRequest::new(3, 5).unwrap());

    assert_eq!(ids(&page.posts), vec![11, 12]);
}

#[test]
fn test_out_of_range_page_is_empty() {
    let posts = numbered(12);

    let page = paginate(&posts, PageRequest::new(4, 5).unwrap());

    assert!(page.posts.is_empty());
    assert_eq!(page.total_pages, 3);
}

#[test]
fn test_empty_store_has_zero_pages() {
    let page = paginate::<Post>(&[], PageRequest::default());

    assert_eq!(page.total_posts, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.posts.is_empty());
}

#[test]
fn test_huge_page_does_not_overflow() {
    let posts = numbered(3);

    let page = paginate(&posts, PageRequest::new(usize::MAX, usize::MAX / 2).unwrap());

    assert!(page.posts.is_empty());
    assert_eq!(page.total_pages, 1);
}

#[test]
fn test_slice_length_formula() {
    for total in 0..=13u64 {
        let posts = numbered(total);
        for per_page in 1..=6usize {
            for page in 1..=6usize {
                let result = paginate(&posts, PageRequest::new(page, per_page).unwrap());
                let skipped = (page - 1) * per_page;
                let expected = per_page.min((total as usize).saturating_sub(skipped));
                assert_eq!(
                    result.posts.len(),
                    expected,
                    "total={} page={} per_page={}",
                    total,
                    page,
                    per_page
                );
            }
        }
    }
}

#[test]
fn test_page_request_rejects_zero() {
    assert!(matches!(
        PageRequest::new(0, 5),
        Err(BlogError::InvalidParameter(_))
    ));
    assert!(matches!(
        PageRequest::new(1, 0),
        Err(BlogError::InvalidParameter(_))
    ));
}

// =============================================================================
// Sort Tests
// =============================================================================

#[test]
fn test_sort_by_title_asc() {
    let mut posts = sample();

    sort_posts(&mut posts, SortSpec::new(PostField::Title, SortDirection::Asc));

    assert_eq!(ids(&posts), vec![4, 2, 3, 1]);
}

#[test]
fn test_sort_by_date_is_stable_both_ways() {
    let mut asc = sample();
    let mut desc = sample();

    sort_posts(&mut asc, SortSpec::new(PostField::Date, SortDirection::Asc));
    sort_posts(&mut desc, SortSpec::new(PostField::Date, SortDirection::Desc));

    // posts 1 and 3 share a date and keep store order in both directions
    assert_eq!(ids(&asc), vec![4, 2, 1, 3]);
    assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
}

#[test]
fn test_sort_by_date_distinct_keys_reverse() {
    let mut posts = Vec::new();
    posts.push(post(1, "a", "x", "2025-01-03"));
    posts.push(post(2, "b", "x", "2025-01-01"));
    posts.push(post(3, "c", "x", "2025-01-02"));
    let mut desc = posts.clone();

    sort_posts(&mut posts, SortSpec::new(PostField::Date, SortDirection::Asc));
    sort_posts(&mut desc, SortSpec::new(PostField::Date, SortDirection::Desc));

    let mut reversed = ids(&desc);
    reversed.reverse();
    assert_eq!(ids(&posts), reversed);
}

#[test]
fn test_sort_spec_parse() {
    assert_eq!(SortSpec::parse(None, None).unwrap(), None);
    assert_eq!(SortSpec::parse(Some("  "), Some("desc")).unwrap(), None);
    assert_eq!(
        SortSpec::parse(Some(" Author "), None).unwrap(),
        Some(SortSpec::new(PostField::Author, SortDirection::Asc))
    );
    assert_eq!(
        SortSpec::parse(Some("date"), Some("DESC")).unwrap(),
        Some(SortSpec::new(PostField::Date, SortDirection::Desc))
    );
}

#[test]
fn test_sort_spec_rejects_invalid_values() {
    assert!(matches!(
        SortSpec::parse(Some("id"), None),
        Err(BlogError::InvalidParameter(_))
    ));
    assert!(matches!(
        SortSpec::parse(Some("title"), Some("sideways")),
        Err(BlogError::InvalidParameter(_))
    ));
    assert!(matches!(
        SortSpec::parse(None, Some("sideways")),
        Err(BlogError::InvalidParameter(_))
    ));
}

#[test]
fn test_list_page_sorts_before_slicing() {
    let posts = sample();

    let page = list_page(
        &posts,
        Some(SortSpec::new(PostField::Title, SortDirection::Desc)),
        PageRequest::new(1, 2).unwrap(),
    );

    assert_eq!(ids(&page.posts), vec![1, 3]);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn test_list_page_without_sort_keeps_store_order() {
    let posts = sample();

    let page = list_page(&posts, None, PageRequest::new(2, 3).unwrap());

    assert_eq!(ids(&page.posts), vec![4]);
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_query_matches_content_case_insensitively() {
    let mut posts = sample();
    posts.push(Post {
        id: 5,
        title: "Opening Strategies".to_string(),
        content: "The Sicilian Defense is sharp.".to_string(),
        author: "Magnus Carlsen".to_string(),
        date: "2025-02-18".to_string(),
    });

    let results = search_posts(&posts, &SearchFilter::new().query("sicilian"));

    assert_eq!(ids(&results), vec![5]);
}

#[test]
fn test_query_matches_any_field() {
    let posts = sample();

    assert_eq!(
        ids(&search_posts(&posts, &SearchFilter::new().query("CARLSEN"))),
        vec![1, 4]
    );
    assert_eq!(
        ids(&search_posts(&posts, &SearchFilter::new().query("2025-01"))),
        vec![2]
    );
    assert_eq!(
        ids(&search_posts(&posts, &SearchFilter::new().query("chess"))),
        vec![2, 4]
    );
}

#[test]
fn test_field_filters_are_anded() {
    let posts = sample();

    let filter = SearchFilter::new()
        .field(PostField::Author, "magnus")
        .field(PostField::Date, "2025");

    assert_eq!(ids(&search_posts(&posts, &filter)), vec![1]);
}

#[test]
fn test_field_filter_only_checks_its_field() {
    let posts = sample();

    // "Rook" is in post 1's title and content, but no author
    let filter = SearchFilter::new().field(PostField::Author, "rook");

    assert!(search_posts(&posts, &filter).is_empty());
}

#[test]
fn test_query_and_field_filter_combined() {
    let posts = sample();

    let filter = SearchFilter::new()
        .query("chess")
        .field(PostField::Author, "carlsen");

    assert_eq!(ids(&search_posts(&posts, &filter)), vec![4]);
}

#[test]
fn test_empty_filter_returns_everything() {
    let posts = sample();

    let results = search_posts(&posts, &SearchFilter::new().query("  "));

    assert_eq!(ids(&results), vec![1, 2, 3, 4]);
}

#[test]
fn test_no_match() {
    let posts = sample();

    let results = search_posts(&posts, &SearchFilter::new().query("checkers"));

    assert!(results.is_empty());
}
