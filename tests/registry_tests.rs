//! RegistryStore integration tests — no running server, on-disk SQLite via
//! Storage::open (same schema path as production).

use async_trait::async_trait;
use giftd::notify::{Notifier, NotifyError};
use giftd::registry::{ClaimOutcome, RegistryStore, UnclaimOutcome};
use giftd::sheet::SheetRow;
use giftd::storage::Storage;

/// Spin up a temporary Storage (SQLite on disk via tempdir) and return the
/// registry store.
async fn make_store() -> (RegistryStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let storage = Storage::open(&dir.path().join("giftd.db"))
        .await
        .expect("Storage::open failed");
    (RegistryStore::new(storage.clone_pool()), dir)
}

fn row(name: &str, link1: &str, cores: &str) -> SheetRow {
    SheetRow {
        presente: name.to_string(),
        sugestao1: link1.to_string(),
        sugestao2: String::new(),
        cores: cores.to_string(),
    }
}

/// Notifier that records every delivered name instead of sending email.
#[derive(Default)]
struct RecordingNotifier {
    calls: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, item_name: &str) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(item_name.to_string());
        Ok(())
    }
}

// ─── 1. Claim exclusivity ─────────────────────────────────────────────────────

/// N visitors race to claim the same unclaimed item. Exactly one must get
/// `Claimed`; the rest must get `AlreadyClaimed`.
#[tokio::test]
async fn test_concurrent_claims_have_one_winner() {
    let (store, _dir) = make_store().await;
    store
        .sync(&[row("Panela", "https://x.com", "vermelho")])
        .await
        .unwrap();
    let id = store.list().await.unwrap()[0].id;

    const N: usize = 8;
    let mut handles = Vec::new();
    for _ in 0..N {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.claim(id).await }));
    }

    let mut wins = 0;
    let mut losses = 0;
    for handle in handles {
        match handle.await.expect("claim task panicked").unwrap() {
            ClaimOutcome::Claimed { name } => {
                assert_eq!(name, "Panela");
                wins += 1;
            }
            ClaimOutcome::AlreadyClaimed => losses += 1,
            ClaimOutcome::NotFound => panic!("seeded item reported NotFound"),
        }
    }

    assert_eq!(wins, 1, "exactly one claim must win");
    assert_eq!(losses, N - 1);
}

// ─── 2. Sync behaviour across passes ──────────────────────────────────────────

/// Running sync twice with the same sheet leaves exactly one item per name.
#[tokio::test]
async fn test_double_sync_leaves_no_duplicates() {
    let (store, _dir) = make_store().await;
    let rows = [
        row("Panela", "https://x.com", "vermelho"),
        row("Toalha", "", "azul"),
    ];

    store.sync(&rows).await.unwrap();
    let second = store.sync(&rows).await.unwrap();

    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);

    let items = store.list().await.unwrap();
    assert_eq!(items.len(), 2);
    let mut names: Vec<_> = items.iter().map(|i| i.presente.as_str()).collect();
    names.dedup();
    assert_eq!(names.len(), 2, "every stored name must be distinct");
}

/// Ids assigned on first insertion survive later sync passes unchanged.
#[tokio::test]
async fn test_sync_keeps_ids_stable() {
    let (store, _dir) = make_store().await;
    store
        .sync(&[row("Panela", "", ""), row("Toalha", "", "")])
        .await
        .unwrap();
    let before: Vec<i64> = store.list().await.unwrap().iter().map(|i| i.id).collect();

    // Re-import with one new row appended.
    store
        .sync(&[
            row("Panela", "", ""),
            row("Toalha", "", ""),
            row("Jogo de copos", "", ""),
        ])
        .await
        .unwrap();

    let after = store.list().await.unwrap();
    let after_ids: Vec<i64> = after.iter().map(|i| i.id).collect();
    assert_eq!(&after_ids[..2], &before[..], "existing ids must not move");
    assert_eq!(after.len(), 3);
    assert_eq!(after[2].presente, "Jogo de copos");
}

// ─── 3. End-to-end scenario ───────────────────────────────────────────────────

/// Seed → claim (notified) → re-claim (rejected, not notified) → admin
/// unclaim → claim again (notified again).
#[tokio::test]
async fn test_end_to_end_claim_lifecycle() {
    let (store, _dir) = make_store().await;
    let notifier = RecordingNotifier::default();

    store
        .sync(&[row("Panela", "https://x.com", "vermelho")])
        .await
        .unwrap();

    let items = store.list().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].presente, "Panela");
    assert!(!items[0].is_claimed());
    let id = items[0].id;

    // First claim wins and triggers a notification.
    match store.claim(id).await.unwrap() {
        ClaimOutcome::Claimed { name } => {
            assert_eq!(name, "Panela");
            notifier.notify(&name).await.unwrap();
        }
        other => panic!("expected Claimed, got {other:?}"),
    }
    assert_eq!(*notifier.calls.lock().unwrap(), vec!["Panela"]);

    // Second claim is rejected; the notifier must not fire.
    assert_eq!(store.claim(id).await.unwrap(), ClaimOutcome::AlreadyClaimed);
    assert_eq!(notifier.calls.lock().unwrap().len(), 1);

    // Admin releases the claim.
    assert_eq!(store.unclaim(id).await.unwrap(), UnclaimOutcome::Cleared);
    assert!(!store.get(id).await.unwrap().unwrap().is_claimed());

    // The item can be claimed again, notifying a second time.
    match store.claim(id).await.unwrap() {
        ClaimOutcome::Claimed { name } => notifier.notify(&name).await.unwrap(),
        other => panic!("expected Claimed after unclaim, got {other:?}"),
    }
    assert_eq!(*notifier.calls.lock().unwrap(), vec!["Panela", "Panela"]);
}

// ─── 4. Unclaim edge cases ────────────────────────────────────────────────────

#[tokio::test]
async fn test_unclaim_idempotence_and_not_found() {
    let (store, _dir) = make_store().await;
    store.sync(&[row("Panela", "", "")]).await.unwrap();
    let id = store.list().await.unwrap()[0].id;

    // Never-claimed item: unclaim is a no-op success.
    assert_eq!(store.unclaim(id).await.unwrap(), UnclaimOutcome::Cleared);
    assert!(!store.get(id).await.unwrap().unwrap().is_claimed());

    // Unknown id is distinct from a no-op.
    assert_eq!(store.unclaim(9999).await.unwrap(), UnclaimOutcome::NotFound);
}
