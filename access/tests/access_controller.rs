use access::*;
use tokio::time::{sleep, Duration};

fn gate() -> AccessController<MemorySessionStore, MemoryQuery> {
    AccessController::new(MemorySessionStore::new(), MemoryQuery::new())
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn invalid_code_raises_then_clears_error() {
    let mut gate = gate();
    assert!(matches!(gate.submit_code("wrong"), Err(AccessError::InvalidCode)));
    assert!(!gate.is_unlocked());
    assert!(gate.last_error());

    sleep(Duration::from_millis(1999)).await;
    settle().await;
    assert!(gate.last_error());

    sleep(Duration::from_millis(2)).await;
    settle().await;
    assert!(!gate.last_error());
    assert_eq!(gate.state(), GateState::Locked);
    assert!(gate.store().get(SESSION_KEY).is_none());
    assert!(gate.query().get(ACCESS_QUERY_PARAM).is_none());
}

#[tokio::test(start_paused = true)]
async fn second_invalid_submit_is_not_cleared_by_first_timer() {
    let mut gate = gate();
    let _ = gate.submit_code("one");
    sleep(Duration::from_millis(1500)).await;
    let _ = gate.submit_code("two");

    // The first timer would have fired at 2000ms.
    sleep(Duration::from_millis(1000)).await;
    settle().await;
    assert!(gate.last_error());

    // Second timer is due at 3500ms.
    sleep(Duration::from_millis(1100)).await;
    settle().await;
    assert!(!gate.last_error());
}

#[tokio::test(start_paused = true)]
async fn valid_code_unlocks_persists_and_rewrites_query() {
    let mut gate = gate();
    let _ = gate.submit_code("nope");
    assert!(gate.last_error());

    assert_eq!(gate.submit_code(DEFAULT_ACCESS_CODE).unwrap(), Unlocked);
    assert!(gate.is_unlocked());
    assert!(!gate.last_error());
    assert!(!gate.has_pending_timer());
    assert_eq!(gate.store().get(SESSION_KEY).as_deref(), Some(DEFAULT_ACCESS_CODE));
    assert_eq!(gate.query().get(ACCESS_QUERY_PARAM).as_deref(), Some(DEFAULT_ACCESS_CODE));

    // Idempotent.
    gate.submit_code(DEFAULT_ACCESS_CODE).unwrap();
    assert!(gate.is_unlocked());
    assert_eq!(gate.store().get(SESSION_KEY).as_deref(), Some(DEFAULT_ACCESS_CODE));
}

#[tokio::test(start_paused = true)]
async fn unlocked_is_terminal() {
    let mut gate = gate();
    gate.submit_code(DEFAULT_ACCESS_CODE).unwrap();
    assert!(gate.submit_code("wrong").is_err());
    assert!(gate.is_unlocked());
    assert!(!gate.last_error());
    assert!(gate.mount());
}

#[test]
fn mount_unlocks_from_query_param() {
    let mut gate = AccessController::new(
        MemorySessionStore::new(),
        MemoryQuery::new().with(ACCESS_QUERY_PARAM, DEFAULT_ACCESS_CODE),
    );
    assert!(gate.mount());
    assert_eq!(gate.state(), GateState::Unlocked);
}

#[test]
fn mount_unlocks_from_session_flag() {
    let mut gate = AccessController::new(
        MemorySessionStore::new().with(SESSION_KEY, DEFAULT_ACCESS_CODE),
        MemoryQuery::new().with(ACCESS_QUERY_PARAM, "stale"),
    );
    assert!(gate.mount());
}

#[test]
fn mount_stays_locked_on_wrong_values() {
    let mut gate = AccessController::new(
        MemorySessionStore::new().with(SESSION_KEY, "old"),
        MemoryQuery::new().with(ACCESS_QUERY_PARAM, "older"),
    );
    assert!(!gate.mount());
    assert!(!gate.last_error());
}

#[test]
fn query_change_triggers_unlock() {
    let mut gate = AccessController::new(
        MemorySessionStore::new(),
        UrlQuery::parse("https://pixel.example/?ref=card").unwrap(),
    );
    assert!(!gate.mount());

    assert!(!gate.navigate(|q| q.set(ACCESS_QUERY_PARAM, "nope")));
    assert_eq!(gate.state(), GateState::Locked);

    assert!(gate.navigate(|q| q.set(ACCESS_QUERY_PARAM, DEFAULT_ACCESS_CODE)));
    assert!(gate.is_unlocked());
    assert_eq!(gate.query().get("ref").as_deref(), Some("card"));
    // Unlocking through the URL does not write the session flag.
    assert!(gate.store().get(SESSION_KEY).is_none());
}

#[test]
fn navigating_away_does_not_relock() {
    let mut gate = AccessController::new(
        MemorySessionStore::new(),
        MemoryQuery::new().with(ACCESS_QUERY_PARAM, DEFAULT_ACCESS_CODE),
    );
    assert!(gate.mount());
    assert!(gate.navigate(|q| q.set(ACCESS_QUERY_PARAM, "")));
    assert!(gate.is_unlocked());
}

#[tokio::test(start_paused = true)]
async fn url_query_is_rewritten_on_unlock() {
    let mut gate = AccessController::new(
        MemorySessionStore::new(),
        UrlQuery::parse("https://pixel.example/?ref=card").unwrap(),
    );
    gate.submit_code(DEFAULT_ACCESS_CODE).unwrap();
    assert_eq!(
        gate.query().url().as_str(),
        "https://pixel.example/?ref=card&access=pixel01"
    );
}

#[tokio::test(start_paused = true)]
async fn dispose_cancels_pending_clear() {
    let mut gate = gate();
    let _ = gate.submit_code("wrong");
    assert!(gate.has_pending_timer());
    gate.dispose();
    assert!(!gate.has_pending_timer());

    sleep(Duration::from_millis(3000)).await;
    settle().await;
    // Nothing touched the flag after disposal.
    assert!(gate.last_error());
}

#[tokio::test(start_paused = true)]
async fn drop_aborts_timer_and_observers_see_no_late_clear() {
    let mut gate = gate();
    let mut rx = gate.subscribe_error();
    let _ = gate.submit_code("wrong");
    assert!(rx.borrow_and_update().raised);
    drop(gate);

    sleep(Duration::from_millis(3000)).await;
    settle().await;
    // Sender is gone; the last published value is still the raised flag.
    assert!(rx.borrow().raised);
    assert!(rx.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn observers_are_notified_on_clear() {
    let mut gate = gate();
    let mut rx = gate.subscribe_error();
    let _ = gate.submit_code("wrong");
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().raised);

    rx.changed().await.unwrap();
    let flag = *rx.borrow_and_update();
    assert!(!flag.raised);
    assert_eq!(flag.generation, 1);
    assert!(!gate.last_error());
}

#[tokio::test(start_paused = true)]
async fn any_number_of_guesses_is_allowed() {
    let mut gate = gate();
    for i in 0..50 {
        let _ = gate.submit_code(&format!("guess-{i}"));
        assert_eq!(gate.state(), GateState::Locked);
        assert_eq!(gate.pending_code(), "");
        assert!(gate.store().get(SESSION_KEY).is_none());
        assert!(gate.query().get(ACCESS_QUERY_PARAM).is_none());
    }
    assert!(gate.submit_code(DEFAULT_ACCESS_CODE).is_ok());
    assert!(gate.is_unlocked());
}
