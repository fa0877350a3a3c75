use std::sync::Arc;

use morningbrief_lib::feedback::MockFeedbackSink;
use morningbrief_lib::notification::{NotificationKind, RecordingNotifier};
use morningbrief_lib::provider::MockProvider;
use morningbrief_lib::store::{JsonFileStore, PersistedStore, CHECKED_ITEMS_KEY};
use morningbrief_lib::types::Theme;
use morningbrief_lib::{BriefError, BriefView, LoadOutcome};
use tempfile::TempDir;

fn open_view(store_path: &std::path::Path, sink: Arc<MockFeedbackSink>) -> (BriefView, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let view = BriefView::new(
        Arc::new(MockProvider::default()),
        sink,
        Arc::new(JsonFileStore::new(store_path)),
        notifier.clone(),
    );
    (view, notifier)
}

#[tokio::test]
async fn checklist_survives_reload_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let sink = Arc::new(MockFeedbackSink::default());

    {
        let (mut view, notifier) = open_view(&path, sink.clone());
        assert_eq!(view.mount().await, LoadOutcome::Ready);
        view.toggle("primary", true).unwrap();
        view.toggle("activity-0", true).unwrap();
        assert_eq!(notifier.count(NotificationKind::TaskCompleted), 2);
    }

    let (view, _) = open_view(&path, sink);
    view.mount().await;
    assert_eq!(view.completed_ids().unwrap(), &["primary", "activity-0"]);
    // 2 of 6 items (primary + 3 activities + 2 delegations)
    assert_eq!(view.completion_percentage().unwrap(), 33);
}

#[tokio::test]
async fn corrupt_store_starts_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    std::fs::write(&path, r#"{"checkedItems": "not-a-list"}"#).unwrap();

    let (view, _) = open_view(&path, Arc::new(MockFeedbackSink::default()));
    view.mount().await;
    assert!(view.completed_ids().unwrap().is_empty());
    assert_eq!(view.completion_percentage().unwrap(), 0);
}

#[tokio::test]
async fn complete_all_and_reset_are_persisted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let (mut view, _) = open_view(&path, Arc::new(MockFeedbackSink::default()));
    view.mount().await;

    view.complete_all().unwrap();
    assert_eq!(view.completion_percentage().unwrap(), 100);
    let stored = JsonFileStore::new(&path).load(CHECKED_ITEMS_KEY).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 6);

    view.reset().unwrap();
    assert_eq!(view.completion_percentage().unwrap(), 0);
    let stored = JsonFileStore::new(&path).load(CHECKED_ITEMS_KEY).unwrap();
    assert!(stored.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failed_feedback_keeps_rating_for_resubmission() {
    let temp = TempDir::new().unwrap();
    let sink = Arc::new(MockFeedbackSink::default().with_failure(true));
    let (view, notifier) = open_view(&temp.path().join("store.json"), sink.clone());
    view.mount().await;

    view.set_rating(3).unwrap();
    let err = view.submit_feedback().await.unwrap_err();
    assert!(matches!(err, BriefError::Submission(_)));
    assert_eq!(view.rating(), 3);
    assert_eq!(notifier.count(NotificationKind::Error), 1);

    sink.set_failing(false);
    view.submit_feedback().await.unwrap();
    assert_eq!(view.rating(), 0);
}

#[tokio::test]
async fn theme_and_checklist_share_one_store_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    let (mut view, _) = open_view(&path, Arc::new(MockFeedbackSink::default()));
    view.mount().await;

    view.toggle("delegation-1", true).unwrap();
    assert_eq!(view.toggle_theme().unwrap(), Theme::Light);

    let (reopened, _) = open_view(&path, Arc::new(MockFeedbackSink::default()));
    assert_eq!(reopened.theme(), Theme::Light);
    assert_eq!(reopened.completed_ids(), Err(BriefError::NotReady));
    reopened.mount().await;
    assert_eq!(reopened.completed_ids().unwrap(), &["delegation-1"]);
}
