//! Orchestrator behavior tests over the in-memory mock API, run under a
//! paused tokio clock so debounce windows and simulated latency resolve
//! deterministically and instantly.

use tokio::time::{sleep, Duration};

use notehub_cache::{NotesOrchestrator, OrchestratorConfig, ViewState};
use notehub_client::mock::MockNotesApi;
use notehub_core::{NoteDraft, NoteTag};

fn seeded_api() -> MockNotesApi {
    MockNotesApi::new()
        .with_note("Buy milk", "two liters", NoteTag::Shopping)
        .with_note("Standup notes", "weekly sync", NoteTag::Meeting)
        .with_note("Buy stamps", "post office", NoteTag::Todo)
}

fn orchestrator_over(api: &MockNotesApi, per_page: u32) -> NotesOrchestrator<MockNotesApi> {
    NotesOrchestrator::new(
        api.clone(),
        OrchestratorConfig::default().with_per_page(per_page),
    )
}

/// Let spawned debounce timers and in-flight fetches run to completion.
/// Under a paused clock this advances virtual time without real waiting.
async fn settle() {
    sleep(Duration::from_millis(2000)).await;
}

fn populated(view: ViewState) -> notehub_core::NotePage {
    match view {
        ViewState::Populated(page) => page,
        other => panic!("expected populated view, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn refresh_populates_view() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);

    orchestrator.refresh().await;

    let page = populated(orchestrator.view().await);
    assert_eq!(page.notes.len(), 3);
    assert_eq!(api.call_count("list_notes"), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_result_shows_empty_state() {
    let api = MockNotesApi::new();
    let orchestrator = orchestrator_over(&api, 12);

    orchestrator.refresh().await;

    assert_eq!(orchestrator.view().await, ViewState::Empty);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_shows_error_and_recovers() {
    let api = seeded_api().with_failure(Some(500), "upstream down");
    let orchestrator = orchestrator_over(&api, 12);

    orchestrator.refresh().await;
    match orchestrator.view().await {
        ViewState::Error(reason) => assert!(reason.contains("upstream down")),
        other => panic!("expected error view, got {:?}", other),
    }

    api.clear_failure();
    orchestrator.refresh().await;
    assert_eq!(populated(orchestrator.view().await).notes.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn debounce_coalesces_rapid_edits() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;
    assert_eq!(api.call_count("list_notes"), 1);

    // Three keystrokes inside one debounce window: one request.
    orchestrator.set_search("b").await;
    orchestrator.set_search("bu").await;
    orchestrator.set_search("buy").await;
    settle().await;

    assert_eq!(api.call_count("list_notes"), 2);
    let calls = api.calls();
    assert!(calls.last().unwrap().detail.contains("buy"));

    let key = orchestrator.active_key().await;
    assert_eq!(key.page, 1);
    assert_eq!(key.search.as_deref(), Some("buy"));

    assert_eq!(populated(orchestrator.view().await).notes.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn blank_search_means_no_filter() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);

    orchestrator.set_search("   ").await;
    settle().await;

    let key = orchestrator.active_key().await;
    assert_eq!(key.search, None);
    let calls = api.calls();
    assert!(calls.last().unwrap().detail.contains("search=None"));
}

#[tokio::test(start_paused = true)]
async fn stale_data_stays_visible_while_next_page_loads() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 2);
    orchestrator.refresh().await;
    assert_eq!(populated(orchestrator.view().await).notes.len(), 2);

    api.set_latency_ms(300);
    let background = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.set_page(2).await })
    };
    tokio::task::yield_now().await;

    // Page 2 is in flight: the view must keep showing page 1, never blank.
    let mid_flight = populated(orchestrator.view().await);
    assert_eq!(mid_flight.notes.len(), 2);
    assert_eq!(mid_flight.notes[0].title, "Buy milk");

    background.await.unwrap();
    let after = populated(orchestrator.view().await);
    assert_eq!(after.notes.len(), 1);
    assert_eq!(after.notes[0].title, "Buy stamps");
}

#[tokio::test(start_paused = true)]
async fn slow_superseded_response_lands_in_its_own_key() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 2);
    orchestrator.refresh().await;

    // Start a slow fetch for page 2, then navigate back to page 1 before
    // it arrives. Page 1 is cached, so the view flips back instantly.
    api.set_latency_ms(500);
    let slow = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.set_page(2).await })
    };
    tokio::task::yield_now().await;

    orchestrator.set_page(1).await;
    assert_eq!(populated(orchestrator.view().await).notes.len(), 2);

    slow.await.unwrap();
    settle().await;

    // The slow arrival updated page 2's entry, not the active view.
    assert_eq!(populated(orchestrator.view().await).notes.len(), 2);
    let page2 = orchestrator
        .entry(&orchestrator.active_key().await.at_page(2))
        .await
        .expect("page 2 entry exists");
    assert_eq!(page2.data.unwrap().notes.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cached_page_is_served_without_request() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 2);

    orchestrator.refresh().await;
    orchestrator.set_page(2).await;
    assert_eq!(api.call_count("list_notes"), 2);

    orchestrator.set_page(1).await;
    assert_eq!(
        api.call_count("list_notes"),
        2,
        "back-navigation to a fresh cached page must not refetch"
    );
    assert_eq!(populated(orchestrator.view().await).notes.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn double_invalidation_refetches_once() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;
    assert_eq!(api.call_count("list_notes"), 1);

    orchestrator.invalidate_all().await;
    orchestrator.invalidate_all().await;
    settle().await;

    assert_eq!(
        api.call_count("list_notes"),
        2,
        "invalidating twice must refetch the active key exactly once"
    );
}

#[tokio::test(start_paused = true)]
async fn mutation_during_inflight_fetch_schedules_refetch() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;
    assert_eq!(api.call_count("list_notes"), 1);

    // A slow revalidation is in flight when the create lands. Its
    // response predates the mutation, so a follow-up fetch must run;
    // otherwise the view settles on a listing without the new note.
    api.set_latency_ms(500);
    let inflight = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.refresh().await })
    };
    tokio::task::yield_now().await;

    api.set_latency_ms(0);
    let note = orchestrator
        .create(NoteDraft::new("Landed mid-flight", NoteTag::Work))
        .await
        .unwrap();
    inflight.await.unwrap();
    settle().await;

    assert_eq!(
        api.call_count("list_notes"),
        3,
        "invalidation during an in-flight fetch must schedule a fresh one"
    );
    let page = populated(orchestrator.view().await);
    assert!(page.notes.iter().any(|n| n.id == note.id));
}

#[tokio::test(start_paused = true)]
async fn empty_page_never_becomes_stale_fallback() {
    let api = MockNotesApi::new();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;
    assert_eq!(orchestrator.view().await, ViewState::Empty);

    api.set_latency_ms(300);
    let background = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.set_page(2).await })
    };
    tokio::task::yield_now().await;

    // While page 2 loads there is nothing worth showing: an empty page 1
    // must read as loading, not as a (fake) empty result.
    assert_eq!(orchestrator.view().await, ViewState::Loading);

    background.await.unwrap();
    assert_eq!(orchestrator.view().await, ViewState::Empty);
}

#[tokio::test(start_paused = true)]
async fn create_invalidates_and_new_note_appears() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;

    let note = orchestrator
        .create(NoteDraft::new("Quarterly report", NoteTag::Work).with_content("draft outline"))
        .await
        .unwrap();
    settle().await;

    assert_eq!(api.call_count("list_notes"), 2);
    let page = populated(orchestrator.view().await);
    assert!(page.notes.iter().any(|n| n.id == note.id));
}

#[tokio::test(start_paused = true)]
async fn created_note_is_found_by_search() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);

    let note = orchestrator
        .create(NoteDraft::new("Quarterly report", NoteTag::Work))
        .await
        .unwrap();
    orchestrator.set_search("quarterly").await;
    settle().await;

    let page = populated(orchestrator.view().await);
    assert_eq!(page.notes.len(), 1);
    assert_eq!(page.notes[0].id, note.id);
}

#[tokio::test(start_paused = true)]
async fn delete_invalidates_and_note_disappears() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;

    let victim_id = populated(orchestrator.view().await).notes[0].id.clone();
    let deleted = orchestrator.delete(&victim_id).await.unwrap();
    assert_eq!(deleted.id, victim_id);
    settle().await;

    let page = populated(orchestrator.view().await);
    assert!(page.notes.iter().all(|n| n.id != victim_id));
}

#[tokio::test(start_paused = true)]
async fn failed_delete_does_not_invalidate() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 12);
    orchestrator.refresh().await;
    assert_eq!(api.call_count("list_notes"), 1);

    let err = orchestrator.delete("ghost").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    settle().await;

    assert_eq!(
        api.call_count("list_notes"),
        1,
        "a failed mutation must not trigger a refetch"
    );
}

#[tokio::test(start_paused = true)]
async fn overlapping_fetches_for_different_keys_both_land() {
    let api = seeded_api();
    let orchestrator = orchestrator_over(&api, 2);
    api.set_latency_ms(100);

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.refresh().await })
    };
    let second = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.set_page(2).await })
    };
    futures::future::join_all([first, second])
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let key = orchestrator.active_key().await;
    let page1 = orchestrator.entry(&key.at_page(1)).await.unwrap();
    let page2 = orchestrator.entry(&key.at_page(2)).await.unwrap();
    assert_eq!(page1.data.unwrap().notes.len(), 2);
    assert_eq!(page2.data.unwrap().notes.len(), 1);
}

#[test]
fn config_builders() {
    let config = OrchestratorConfig::default()
        .with_debounce_ms(50)
        .with_per_page(5);
    assert_eq!(config.debounce_ms, 50);
    assert_eq!(config.per_page, 5);
}
