use ema_auth::{
    authenticate, compute_hash, resolve_user, verify, AuthError, CredentialStore,
    MemoryMetaStore, MemoryUserDirectory, SqliteMetaStore, UserIdentifier, UserMetaStore,
    KEY_LENGTH, PRIVATE_KEY_META, PUBLIC_KEY_META,
};
use ema_types::{UserAccount, UserId};
use std::sync::Arc;
use std::thread;

fn account(id: u64, email: &str) -> UserAccount {
    UserAccount {
        id: UserId::new(id),
        email: email.into(),
        display_name: String::new(),
    }
}

fn memory_store() -> CredentialStore {
    CredentialStore::new(Arc::new(MemoryMetaStore::new()))
}

// ── resolve_user ─────────────────────────────────────────────────

#[test]
fn resolve_by_email_is_case_insensitive() {
    let directory: MemoryUserDirectory =
        vec![account(1, "Jane@Example.com"), account(2, "bob@example.com")]
            .into_iter()
            .collect();
    let found = resolve_user(
        &directory,
        &UserIdentifier::Email("jane@example.COM".into()),
    )
    .unwrap();
    assert_eq!(found.id, UserId::new(1));
}

#[test]
fn resolve_by_id() {
    let directory: MemoryUserDirectory = vec![account(7, "x@example.com")].into_iter().collect();
    let found = resolve_user(&directory, &UserIdentifier::Id(UserId::new(7))).unwrap();
    assert_eq!(found.email, "x@example.com");
}

#[test]
fn resolve_unknown_user() {
    let directory = MemoryUserDirectory::new();
    let err = resolve_user(&directory, &UserIdentifier::Id(UserId::new(3))).unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[test]
fn reinserting_account_replaces_email_index() {
    let mut directory = MemoryUserDirectory::new();
    directory.insert(account(1, "old@example.com"));
    directory.insert(account(1, "new@example.com"));
    assert_eq!(directory.len(), 1);
    assert!(
        resolve_user(&directory, &UserIdentifier::Email("old@example.com".into())).is_err()
    );
    assert!(
        resolve_user(&directory, &UserIdentifier::Email("new@example.com".into())).is_ok()
    );
}

// ── get_or_create ────────────────────────────────────────────────

#[test]
fn first_call_issues_keys() {
    let store = memory_store();
    let user = account(1, "jane@example.com");
    assert!(store.load(user.id).unwrap().is_none());

    let cred = store.get_or_create(&user).unwrap();
    assert_eq!(cred.user_id, user.id);
    assert_eq!(cred.public_key.len(), KEY_LENGTH);
    assert_eq!(cred.private_key.len(), KEY_LENGTH);
    assert_ne!(cred.public_key, cred.private_key);
}

#[test]
fn second_call_returns_same_keys() {
    let store = memory_store();
    let user = account(1, "jane@example.com");
    let first = store.get_or_create(&user).unwrap();
    let second = store.get_or_create(&user).unwrap();
    assert_eq!(first, second);
}

#[test]
fn keys_are_per_user() {
    let store = memory_store();
    let a = store.get_or_create(&account(1, "a@example.com")).unwrap();
    let b = store.get_or_create(&account(2, "b@example.com")).unwrap();
    assert_ne!(a.private_key, b.private_key);
}

#[test]
fn existing_key_is_kept_when_partner_missing() {
    let meta = Arc::new(MemoryMetaStore::new());
    let user = account(5, "jane@example.com");
    meta.add_if_absent(user.id, &[(PUBLIC_KEY_META, "existingpublickey000")])
        .unwrap();

    let store = CredentialStore::new(meta.clone());
    let cred = store.get_or_create(&user).unwrap();
    assert_eq!(cred.public_key, "existingpublickey000");
    assert_eq!(cred.private_key.len(), KEY_LENGTH);
    assert_eq!(
        meta.get(user.id, PRIVATE_KEY_META).unwrap(),
        Some(cred.private_key.clone())
    );
}

#[test]
fn empty_stored_key_is_regenerated() {
    let meta = Arc::new(MemoryMetaStore::new());
    let user = account(6, "jane@example.com");
    meta.add_if_absent(user.id, &[(PUBLIC_KEY_META, ""), (PRIVATE_KEY_META, "")])
        .unwrap();

    let cred = CredentialStore::new(meta).get_or_create(&user).unwrap();
    assert_eq!(cred.public_key.len(), KEY_LENGTH);
    assert_eq!(cred.private_key.len(), KEY_LENGTH);
}

#[test]
fn concurrent_first_requests_converge() {
    let store = memory_store();
    let user = account(9, "race@example.com");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let user = user.clone();
            thread::spawn(move || store.get_or_create(&user).unwrap())
        })
        .collect();
    let issued: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let stored = store.load(user.id).unwrap().unwrap();
    assert!(issued.iter().all(|c| *c == stored));
}

#[test]
fn concurrent_first_requests_converge_on_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let meta = Arc::new(SqliteMetaStore::open(&dir.path().join("meta.db")).unwrap());
    let store = CredentialStore::new(meta);
    let user = account(10, "race@example.com");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let user = user.clone();
            thread::spawn(move || store.get_or_create(&user).unwrap())
        })
        .collect();
    let issued: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(issued.windows(2).all(|w| w[0] == w[1]));
}

// ── authenticate ─────────────────────────────────────────────────

#[test]
fn authenticate_accepts_matching_hash() {
    let store = memory_store();
    let cred = store.get_or_create(&account(1, "jane@example.com")).unwrap();
    let hash = compute_hash(&cred.public_key, &cred.private_key);
    assert!(authenticate(&cred, &cred.public_key, &hash));
    assert!(verify(&cred, &cred.public_key, &hash).is_ok());
}

#[test]
fn authenticate_rejects_wrong_hash() {
    let store = memory_store();
    let cred = store.get_or_create(&account(1, "jane@example.com")).unwrap();
    assert!(!authenticate(&cred, &cred.public_key, "deadbeef"));
    assert!(!authenticate(&cred, &cred.public_key, ""));
    assert!(matches!(
        verify(&cred, &cred.public_key, "deadbeef"),
        Err(AuthError::InvalidHash)
    ));
}

#[test]
fn authenticate_ignores_stored_public_key() {
    let store = memory_store();
    let cred = store.get_or_create(&account(1, "jane@example.com")).unwrap();
    // Any public key works as long as the hash was made with the private key.
    let other_public = "someotherpublickey00";
    let hash = compute_hash(other_public, &cred.private_key);
    assert!(authenticate(&cred, other_public, &hash));
}
