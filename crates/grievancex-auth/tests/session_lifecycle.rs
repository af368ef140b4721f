//! End-to-end tests for the session lifecycle: sign-in, restart, sign-out
//! and routing decisions against a shared storage backend.

use grievancex_auth::{
    gate, Admission, AuthError, AuthorityConfig, Directory, FileStorage, MemoryStorage,
    RestorePolicy, Session, SessionAuthority, SessionStorage, SignInOutcome,
};
use grievancex_types::{Destination, Identity, Role};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const KEY: &str = "grievancex_user";

fn start(storage: Arc<MemoryStorage>) -> SessionAuthority<Arc<MemoryStorage>> {
    start_with(storage, AuthorityConfig::default())
}

fn start_with(
    storage: Arc<MemoryStorage>,
    config: AuthorityConfig,
) -> SessionAuthority<Arc<MemoryStorage>> {
    let authority = SessionAuthority::new(Directory::builtin(), storage, config);
    authority.restore().unwrap();
    authority
}

/// Storage whose writes always fail.
struct ReadOnlyStorage(MemoryStorage);

impl SessionStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> grievancex_auth::Result<Option<String>> {
        self.0.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> grievancex_auth::Result<()> {
        Err(AuthError::Storage("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> grievancex_auth::Result<()> {
        Err(AuthError::Storage("read-only".to_string()))
    }
}

// ==================== Sign-in ====================

#[tokio::test(start_paused = true)]
async fn test_every_directory_identity_can_sign_in() {
    let credentials = [
        ("admin@grievancex.com", "admin123"),
        ("citizen@example.com", "citizen123"),
        ("user@demo.com", "demo123"),
    ];
    let directory = Directory::builtin();

    for (email, secret) in credentials {
        let authority = start(Arc::new(MemoryStorage::new()));
        let outcome = authority.authenticate(email, secret).await.unwrap();

        let expected = directory.find(email, secret).unwrap().record();
        assert_eq!(outcome, SignInOutcome::Authenticated(expected.clone()));
        assert_eq!(authority.current_identity(), Some(expected));
    }
}

#[tokio::test(start_paused = true)]
async fn test_persisted_record_has_no_secret() {
    let storage = Arc::new(MemoryStorage::new());
    let authority = start(Arc::clone(&storage));

    authority
        .authenticate("admin@grievancex.com", "admin123")
        .await
        .unwrap();

    let raw = storage.get(KEY).unwrap().unwrap();
    assert!(!raw.contains("admin123"));
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "1",
            "email": "admin@grievancex.com",
            "role": "admin",
            "name": "Admin User"
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_rejection_keeps_previous_session() {
    let storage = Arc::new(MemoryStorage::new());
    let authority = start(Arc::clone(&storage));
    authority
        .authenticate("citizen@example.com", "citizen123")
        .await
        .unwrap();
    let before = authority.session();
    let persisted = storage.get(KEY).unwrap();

    let outcome = authority
        .authenticate("admin@grievancex.com", "wrong")
        .await
        .unwrap();

    assert_eq!(outcome, SignInOutcome::Rejected);
    assert_eq!(authority.session(), before);
    assert_eq!(storage.get(KEY).unwrap(), persisted);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_failures_do_not_lock_out() {
    let authority = start(Arc::new(MemoryStorage::new()));

    for _ in 0..10 {
        let outcome = authority
            .authenticate("citizen@example.com", "nope")
            .await
            .unwrap();
        assert!(!outcome.is_success());
    }

    let outcome = authority
        .authenticate("citizen@example.com", "citizen123")
        .await
        .unwrap();
    assert!(outcome.is_success());
}

#[tokio::test(start_paused = true)]
async fn test_storage_failure_leaves_session_unchanged() {
    let authority = SessionAuthority::new(
        Directory::builtin(),
        ReadOnlyStorage(MemoryStorage::new()),
        AuthorityConfig::default(),
    );
    authority.restore().unwrap();

    let result = authority
        .authenticate("admin@grievancex.com", "admin123")
        .await;

    assert!(matches!(result, Err(AuthError::Storage(_))));
    assert_eq!(authority.session(), Session::settled(None));
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_observe_loading_and_result() {
    let authority = start(Arc::new(MemoryStorage::new()));
    let mut rx = authority.subscribe();

    let check = authority.authenticate("admin@grievancex.com", "admin123");
    tokio::pin!(check);

    // The check raises the loading flag, then suspends on the latency.
    let suspended = tokio::time::timeout(Duration::from_millis(1), &mut check).await;
    assert!(suspended.is_err());
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().loading);

    check.await.unwrap();
    assert!(rx.has_changed().unwrap());
    let session = rx.borrow_and_update().clone();
    assert!(!session.loading);
    assert_eq!(session.role(), Some(Role::Administrator));
}

// ==================== Restart ====================

#[tokio::test(start_paused = true)]
async fn test_restart_restores_identity() {
    let storage = Arc::new(MemoryStorage::new());
    let first = start(Arc::clone(&storage));
    first
        .authenticate("user@demo.com", "demo123")
        .await
        .unwrap();
    let before = first.current_identity();
    drop(first);

    let restarted = SessionAuthority::new(
        Directory::builtin(),
        Arc::clone(&storage),
        AuthorityConfig::default(),
    );
    assert!(restarted.is_loading());
    let restored = restarted.restore().unwrap();

    assert_eq!(restored, before);
    assert_eq!(restarted.current_identity(), before);
    assert!(!restarted.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_end_session_then_restore_is_empty() {
    let storage = Arc::new(MemoryStorage::new());
    let authority = start(Arc::clone(&storage));
    authority
        .authenticate("citizen@example.com", "citizen123")
        .await
        .unwrap();

    authority.end_session().unwrap();
    assert!(storage.is_empty());

    assert_eq!(authority.restore().unwrap(), None);
    let restarted = start(storage);
    assert_eq!(restarted.session(), Session::settled(None));
}

#[tokio::test(start_paused = true)]
async fn test_file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    first.restore().unwrap();
    first
        .authenticate("admin@grievancex.com", "admin123")
        .await
        .unwrap();

    let second = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    let restored = second.restore().unwrap().unwrap();
    assert_eq!(restored.role, Role::Administrator);

    second.end_session().unwrap();
    let third = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    assert_eq!(third.restore().unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_end_session_before_restore_is_noop() {
    let storage = Arc::new(MemoryStorage::new());
    let authority = SessionAuthority::new(
        Directory::builtin(),
        Arc::clone(&storage),
        AuthorityConfig::default(),
    );
    let rx = authority.subscribe();

    authority.end_session().unwrap();

    assert_eq!(authority.session(), Session::new());
    assert_eq!(authority.admit(&Destination::Admin), Admission::Wait);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_end_session_during_authenticate_keeps_loading() {
    let authority = start(Arc::new(MemoryStorage::new()));

    let check = authority.authenticate("citizen@example.com", "citizen123");
    tokio::pin!(check);
    let suspended = tokio::time::timeout(Duration::from_millis(100), &mut check).await;
    assert!(suspended.is_err());
    assert!(authority.is_loading());

    authority.end_session().unwrap();
    assert!(authority.is_loading());
    assert_eq!(authority.admit(&Destination::Report), Admission::Wait);

    let outcome = check.await.unwrap();
    assert!(outcome.is_success());
    assert!(!authority.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_corrupt_storage_file_still_allows_sign_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{truncated").unwrap();

    let first = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    assert_eq!(first.restore().unwrap(), None);
    let outcome = first
        .authenticate("admin@grievancex.com", "admin123")
        .await
        .unwrap();
    assert!(outcome.is_success());

    std::fs::write(&path, "{truncated").unwrap();
    let restarted = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    assert_eq!(restarted.restore().unwrap(), None);
    let outcome = restarted
        .authenticate("citizen@example.com", "citizen123")
        .await
        .unwrap();
    assert!(outcome.is_success());

    let again = SessionAuthority::new(
        Directory::builtin(),
        FileStorage::open(&path),
        AuthorityConfig::default(),
    );
    assert_eq!(again.restore().unwrap().unwrap().role, Role::Citizen);
}

// ==================== Malformed records ====================

#[test]
fn test_malformed_record_is_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "{not json").unwrap();

    let authority = start(Arc::clone(&storage));

    assert_eq!(authority.session(), Session::settled(None));
    assert!(!storage.contains(KEY).unwrap());
}

#[test]
fn test_unknown_identity_is_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            KEY,
            r#"{"id":"42","email":"ghost@x.com","role":"admin","name":"Ghost"}"#,
        )
        .unwrap();

    let authority = start(Arc::clone(&storage));

    assert!(authority.current_identity().is_none());
    assert!(!storage.contains(KEY).unwrap());
}

#[test]
fn test_tampered_role_is_discarded() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            KEY,
            r#"{"id":"2","email":"citizen@example.com","role":"admin","name":"John Doe"}"#,
        )
        .unwrap();

    let authority = start(storage);
    assert!(authority.current_identity().is_none());
}

#[test]
fn test_reject_policy_surfaces_corruption() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(KEY, "garbage").unwrap();

    let config = AuthorityConfig {
        restore_policy: RestorePolicy::Reject,
        ..Default::default()
    };
    let authority = SessionAuthority::new(Directory::builtin(), Arc::clone(&storage), config);

    let result = authority.restore();
    assert!(matches!(result, Err(AuthError::CorruptRecord(_))));
    assert!(!authority.is_loading());
    assert!(authority.current_identity().is_none());
    assert_eq!(storage.get(KEY).unwrap(), Some("garbage".to_string()));
}

#[test]
fn test_custom_storage_key() {
    let storage = Arc::new(MemoryStorage::new());
    let record = Directory::builtin().get("1").unwrap().record();
    storage
        .set("other_key", &serde_json::to_string(&record).unwrap())
        .unwrap();

    let default_key = start(Arc::clone(&storage));
    assert!(default_key.current_identity().is_none());

    let config = AuthorityConfig {
        storage_key: "other_key".to_string(),
        ..Default::default()
    };
    let custom_key = start_with(storage, config);
    assert_eq!(custom_key.current_identity(), Some(record));
}

// ==================== Routing ====================

#[tokio::test(start_paused = true)]
async fn test_citizen_turned_away_from_admin_pages() {
    let authority = start(Arc::new(MemoryStorage::new()));
    authority
        .authenticate("citizen@example.com", "citizen123")
        .await
        .unwrap();

    assert_eq!(
        gate::check(&authority.session(), &[Role::Administrator]),
        Admission::Redirect(Destination::Dashboard)
    );
    assert_eq!(
        authority.admit(&Destination::SignIn),
        Admission::Redirect(Destination::Report)
    );
    assert!(authority.admit(&Destination::Dashboard).is_admitted());
}

#[test]
fn test_signed_out_visitor_sent_to_sign_in() {
    let authority = start(Arc::new(MemoryStorage::new()));

    for page in ["/report", "/dashboard", "/admin", "/analytics"] {
        assert_eq!(
            authority.admit(&Destination::parse(page)),
            Admission::Redirect(Destination::SignIn),
            "{page}"
        );
    }
    assert!(authority.admit(&Destination::parse("/login")).is_admitted());
}

#[test]
fn test_loaded_directory_drives_sign_in() {
    let directory = Directory::new(vec![
        Identity::new("w1", "ward1@city.gov", "ward-pass", Role::Administrator).with_name("Ward 1"),
    ])
    .unwrap();
    let config = AuthorityConfig {
        sign_in_latency_ms: 0,
        ..Default::default()
    };
    let authority = SessionAuthority::new(directory, MemoryStorage::new(), config);
    authority.restore().unwrap();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let outcome = rt
        .block_on(authority.authenticate("admin@grievancex.com", "admin123"))
        .unwrap();
    assert_eq!(outcome, SignInOutcome::Rejected);

    let outcome = rt
        .block_on(authority.authenticate("ward1@city.gov", "ward-pass"))
        .unwrap();
    assert_eq!(outcome.identity().unwrap().name, "Ward 1");
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn prop_non_matching_pairs_are_rejected(email in "[a-z@.]{0,24}", secret in "[a-z0-9]{0,12}") {
        let directory = Directory::builtin();
        prop_assume!(directory.find(&email, &secret).is_none());

        let config = AuthorityConfig { sign_in_latency_ms: 0, ..Default::default() };
        let storage = Arc::new(MemoryStorage::new());
        let authority = SessionAuthority::new(directory, Arc::clone(&storage), config);
        authority.restore().unwrap();

        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let outcome = rt.block_on(authority.authenticate(&email, &secret)).unwrap();

        prop_assert_eq!(outcome, SignInOutcome::Rejected);
        prop_assert_eq!(authority.session(), Session::settled(None));
        prop_assert!(storage.is_empty());
    }

    #[test]
    fn prop_rejection_keeps_signed_in_session(email in "[a-z@.]{0,24}", secret in "[a-z0-9]{0,12}") {
        let directory = Directory::builtin();
        prop_assume!(directory.find(&email, &secret).is_none());

        let config = AuthorityConfig { sign_in_latency_ms: 0, ..Default::default() };
        let storage = Arc::new(MemoryStorage::new());
        let authority = SessionAuthority::new(directory, Arc::clone(&storage), config);
        authority.restore().unwrap();

        let rt = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        rt.block_on(authority.authenticate("user@demo.com", "demo123")).unwrap();
        let before = authority.session();
        let persisted = storage.get(KEY).unwrap();

        let outcome = rt.block_on(authority.authenticate(&email, &secret)).unwrap();

        prop_assert_eq!(outcome, SignInOutcome::Rejected);
        prop_assert_eq!(authority.session(), before);
        prop_assert_eq!(storage.get(KEY).unwrap(), persisted);
    }

    #[test]
    fn prop_gate_never_admits_signed_out(page in prop::sample::select(vec![
        "/report", "/dashboard", "/admin", "/analytics",
    ])) {
        let session = Session::settled(None);
        let destination = Destination::parse(page);
        prop_assert_eq!(gate::resolve(&session, &destination), Admission::Redirect(Destination::SignIn));
    }
}
