//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::testing::FakeCatalog;
use crate::types::{Action, ProductId};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn ids(values: &[&str]) -> Vec<ProductId> {
    values.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Checkpoints Tests
// ============================================================================

#[test]
fn test_checkpoints_start_at_zero() {
    let checkpoints = Checkpoints::new();
    assert_eq!(checkpoints.as_slice(), &[0]);
    assert_eq!(checkpoints.len(), 1);
    assert!(!checkpoints.is_empty());
    assert!(checkpoints.span(0).is_none());
}

#[test]
fn test_checkpoints_span() {
    let mut checkpoints = Checkpoints::new();
    checkpoints.push(3).unwrap();
    checkpoints.push(7).unwrap();

    assert_eq!(checkpoints.span(0), Some(3));
    assert_eq!(checkpoints.span(1), Some(4));
    assert_eq!(checkpoints.span(2), None);
    assert_eq!(checkpoints.last(), 7);
}

#[test]
fn test_checkpoints_reject_non_increasing() {
    let mut checkpoints = Checkpoints::new();
    checkpoints.push(5).unwrap();

    assert!(checkpoints.push(5).is_err());
    assert!(checkpoints.push(2).is_err());
    assert_eq!(checkpoints.as_slice(), &[0, 5]);
}

// ============================================================================
// Scan Tests
// ============================================================================

#[test_case(&["a", "a", "b", "c"], 2, &["a", "b"], Some(2) ; "run before boundary")]
#[test_case(&["a", "b", "c", "d"], 2, &["a", "b"], Some(1) ; "all unique")]
#[test_case(&["a", "b", "b", "c"], 2, &["a", "b"], Some(1) ; "run after boundary")]
#[test_case(&["a", "a", "a"], 1, &["a"], Some(0) ; "page of one")]
#[test_case(&["a", "b", "a", "b", "c"], 3, &["a", "b", "c"], Some(4) ; "interleaved repeats")]
#[test_case(&["a", "a", "b"], 3, &["a", "b"], None ; "batch runs out")]
#[test_case(&[], 2, &[], None ; "empty batch")]
fn test_scan_page(raw: &[&str], page_size: usize, expected: &[&str], stop: Option<usize>) {
    let outcome = scan_page(&ids(raw), page_size);
    assert_eq!(outcome.ids, ids(expected));
    assert_eq!(outcome.stop, stop);
    assert_eq!(outcome.is_exhausted(), stop.is_none());
}

#[test]
fn test_scan_returns_exactly_page_size_unique() {
    for page_size in 1..=8 {
        for repeat in 1..=3 {
            let raw: Vec<ProductId> = (0..page_size * 2)
                .flat_map(|i| std::iter::repeat(format!("id-{i}")).take(repeat))
                .collect();

            let outcome = scan_page(&raw, page_size);
            assert_eq!(outcome.ids.len(), page_size, "p={page_size} r={repeat}");

            let stop = outcome.stop.unwrap();
            // The page ends at the first element of a new run
            assert_eq!(stop, (page_size - 1) * repeat);
        }
    }
}

// ============================================================================
// Pager Tests
// ============================================================================

#[test]
fn test_pager_rejects_zero_page_size() {
    let err = Pager::new(0).unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[test]
fn test_pager_default() {
    let pager = Pager::default();
    assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(pager.cursor(), 0);
    assert_eq!(pager.page_number(), 1);
    assert_eq!(pager.checkpoints().as_slice(), &[0]);
    assert!(pager.has_next());
    assert!(!pager.has_previous());
}

#[tokio::test]
async fn test_first_visit_discovers_checkpoint() {
    let catalog = FakeCatalog::with_ids(&["a", "a", "b", "c", "d", "e"]);
    let mut pager = Pager::new(2).unwrap();

    let page = pager.next_identifier_page(&catalog).await.unwrap();

    assert_eq!(page, ids(&["a", "b"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 3]);
    assert_eq!(
        catalog.calls(),
        vec![(Action::GetIds, json!({"offset": 0, "limit": 4}))]
    );
}

#[tokio::test]
async fn test_revisit_uses_recorded_span() {
    let catalog = FakeCatalog::with_ids(&["a", "a", "b", "c", "d", "d", "e", "f"]);
    let mut pager = Pager::new(2).unwrap();

    pager.next_identifier_page(&catalog).await.unwrap();
    pager.advance_page();
    let second = pager.next_identifier_page(&catalog).await.unwrap();
    assert_eq!(second, ids(&["c", "d"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 3, 5]);

    pager.retreat_page();
    let first = pager.next_identifier_page(&catalog).await.unwrap();
    assert_eq!(first, ids(&["a", "b"]));

    let calls = catalog.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].1, json!({"offset": 3, "limit": 4}));
    // Known page: exact span, no over-fetch
    assert_eq!(calls[2].1, json!({"offset": 0, "limit": 3}));
}

#[tokio::test]
async fn test_revisit_after_advance_replays_known_page() {
    let catalog = FakeCatalog::with_runs(10, 2);
    let mut pager = Pager::new(3).unwrap();

    let first = pager.next_identifier_page(&catalog).await.unwrap();
    pager.advance_page();
    pager.next_identifier_page(&catalog).await.unwrap();
    pager.retreat_page();
    let again = pager.next_identifier_page(&catalog).await.unwrap();

    assert_eq!(first, again);
    assert_eq!(first.len(), 3);
}

#[tokio::test]
async fn test_page_boundary_inside_run_repeats_the_run() {
    // The boundary lands after the first element of a run, so the rest of
    // that run opens the next page
    let catalog = FakeCatalog::with_ids(&["a", "a", "b", "b", "c", "d"]);
    let mut pager = Pager::new(2).unwrap();

    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["a", "b"])
    );
    assert_eq!(pager.checkpoints().as_slice(), &[0, 3]);

    pager.advance_page();
    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["b", "c"])
    );
}

#[tokio::test]
async fn test_long_run_fetches_another_batch() {
    // Each id repeats 5 times, more than a 2-page-size batch holds
    let catalog = FakeCatalog::with_runs(10, 5);
    let mut pager = Pager::new(2).unwrap();

    let first = pager.next_identifier_page(&catalog).await.unwrap();

    assert_eq!(first, ids(&["id-0000", "id-0001"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 6]);
    assert!(pager.has_next());
    assert_eq!(pager.terminal_page(), None);
    assert_eq!(
        catalog.calls(),
        vec![
            (Action::GetIds, json!({"offset": 0, "limit": 4})),
            (Action::GetIds, json!({"offset": 4, "limit": 4})),
        ]
    );

    pager.advance_page();
    let second = pager.next_identifier_page(&catalog).await.unwrap();
    assert_eq!(second, ids(&["id-0001", "id-0002"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 6, 11]);
}

#[tokio::test]
async fn test_long_runs_reach_every_product() {
    let catalog = FakeCatalog::with_runs(10, 5);
    let mut pager = Pager::new(2).unwrap();

    let mut seen = pager.next_identifier_page(&catalog).await.unwrap();
    for _ in 0..20 {
        if !pager.has_next() {
            break;
        }
        pager.advance_page();
        seen.extend(pager.next_identifier_page(&catalog).await.unwrap());
    }

    let expected: Vec<ProductId> = (0..10).map(|i| format!("id-{i:04}")).collect();
    assert_eq!(crate::dedup::dedupe_ids(seen), expected);
    assert_eq!(pager.terminal_page(), Some(9));
    assert_eq!(pager.checkpoints().last(), 50);

    // Past the last page: nothing requested
    let calls_before = catalog.calls().len();
    pager.advance_page();
    assert!(pager
        .next_identifier_page(&catalog)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(catalog.calls().len(), calls_before);
}

#[tokio::test]
async fn test_single_repeated_id_ends_on_short_batch() {
    let catalog = FakeCatalog::with_runs(1, 9);
    let mut pager = Pager::new(2).unwrap();

    let page = pager.next_identifier_page(&catalog).await.unwrap();

    assert_eq!(page, ids(&["id-0000"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 9]);
    assert_eq!(pager.terminal_page(), Some(0));
    // Batches at 0, 4 and 8; the last one comes back short
    assert_eq!(catalog.call_count(Action::GetIds), 3);
}

#[tokio::test]
async fn test_retreat_at_first_page_is_noop() {
    let mut pager = Pager::new(2).unwrap();
    pager.retreat_page();
    pager.retreat_page();
    assert_eq!(pager.cursor(), 0);

    pager.advance_page();
    pager.retreat_page();
    pager.retreat_page();
    assert_eq!(pager.cursor(), 0);
}

#[tokio::test]
async fn test_checkpoints_strictly_increase_under_navigation() {
    let catalog = FakeCatalog::with_runs(40, 1);
    let mut pager = Pager::new(4).unwrap();

    let moves = [1, 1, -1, 1, 1, -1, -1, -1, -1, 1, 1, 1, 1, -1, 1];
    pager.next_identifier_page(&catalog).await.unwrap();
    let mut previous_len = pager.checkpoints().len();

    for step in moves {
        if step > 0 {
            pager.advance_page();
        } else {
            pager.retreat_page();
        }
        let page = pager.next_identifier_page(&catalog).await.unwrap();
        assert_eq!(page.len(), 4);

        let offsets = pager.checkpoints().as_slice();
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        assert!(offsets.len() >= previous_len);
        previous_len = offsets.len();
    }

    assert_eq!(pager.checkpoints().as_slice(), &[0, 4, 8, 12, 16, 20]);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let catalog = FakeCatalog::with_runs(12, 1);
    let mut pager = Pager::new(3).unwrap();

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.extend(pager.next_identifier_page(&catalog).await.unwrap());
        pager.advance_page();
    }

    let expected: Vec<ProductId> = (0..12).map(|i| format!("id-{i:04}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_short_final_page_marks_terminal() {
    let catalog = FakeCatalog::with_ids(&["a", "b", "c"]);
    let mut pager = Pager::new(2).unwrap();

    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["a", "b"])
    );
    pager.advance_page();
    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["c"])
    );

    assert_eq!(pager.checkpoints().as_slice(), &[0, 2, 3]);
    assert_eq!(pager.terminal_page(), Some(1));
    assert!(pager.is_terminal());
    assert!(!pager.has_next());

    // Past the end: empty without a request
    pager.advance_page();
    let calls_before = catalog.calls().len();
    assert!(pager
        .next_identifier_page(&catalog)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(catalog.calls().len(), calls_before);

    // The short page replays its recorded span
    pager.retreat_page();
    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["c"])
    );
    assert_eq!(
        catalog.calls().last().unwrap().1,
        json!({"offset": 2, "limit": 1})
    );
}

#[tokio::test]
async fn test_empty_page_after_exact_end() {
    let catalog = FakeCatalog::with_ids(&["a", "b", "c", "d"]);
    let mut pager = Pager::new(2).unwrap();

    pager.next_identifier_page(&catalog).await.unwrap();
    pager.advance_page();
    assert_eq!(
        pager.next_identifier_page(&catalog).await.unwrap(),
        ids(&["c", "d"])
    );
    assert!(pager.has_next());

    pager.advance_page();
    assert!(pager
        .next_identifier_page(&catalog)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(pager.terminal_page(), Some(2));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 2, 4]);

    let calls_before = catalog.calls().len();
    pager.next_identifier_page(&catalog).await.unwrap();
    assert_eq!(catalog.calls().len(), calls_before);
}

#[tokio::test]
async fn test_empty_catalog() {
    let catalog = FakeCatalog::with_ids(&[]);
    let mut pager = Pager::new(5).unwrap();

    assert!(pager
        .next_identifier_page(&catalog)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(pager.terminal_page(), Some(0));
    assert_eq!(pager.checkpoints().as_slice(), &[0]);
    assert!(!pager.has_next());
}

#[tokio::test]
async fn test_skipped_pages_are_discovered_in_order() {
    let catalog = FakeCatalog::with_runs(10, 1);
    let mut pager = Pager::new(2).unwrap();

    pager.advance_page();
    pager.advance_page();
    let page = pager.next_identifier_page(&catalog).await.unwrap();

    assert_eq!(page, ids(&["id-0004", "id-0005"]));
    assert_eq!(pager.checkpoints().as_slice(), &[0, 2, 4, 6]);
    assert_eq!(catalog.call_count(Action::GetIds), 3);
}

#[tokio::test]
async fn test_skipping_past_the_end() {
    let catalog = FakeCatalog::with_ids(&["a", "b", "c"]);
    let mut pager = Pager::new(2).unwrap();

    for _ in 0..5 {
        pager.advance_page();
    }
    let page = pager.next_identifier_page(&catalog).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(pager.terminal_page(), Some(1));
    assert_eq!(catalog.call_count(Action::GetIds), 2);
}

#[tokio::test]
async fn test_reset_returns_to_first_page() {
    let catalog = FakeCatalog::with_runs(10, 1);
    let mut pager = Pager::new(2).unwrap();

    pager.next_identifier_page(&catalog).await.unwrap();
    pager.advance_page();
    pager.next_identifier_page(&catalog).await.unwrap();
    pager.reset();

    assert_eq!(pager.cursor(), 0);
    // Checkpoints survive a reset
    assert_eq!(pager.checkpoints().as_slice(), &[0, 2, 4]);
}
