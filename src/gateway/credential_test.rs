use super::*;

// =========================================================================
// MemoryCredentialStore
// =========================================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryCredentialStore::new();
    assert_eq!(store.get(TOKEN_KEY), None);

    store.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

    store.set(TOKEN_KEY, "def").unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("def"));

    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn memory_store_remove_absent_is_noop() {
    let store = MemoryCredentialStore::new();
    store.remove(TOKEN_KEY).unwrap();
    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn memory_store_keys_are_independent() {
    let store = MemoryCredentialStore::with_token("abc");
    store.set("theme", "dark").unwrap();
    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

// =========================================================================
// FileCredentialStore
// =========================================================================

#[test]
fn file_store_missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.json"));
    assert_eq!(store.get(TOKEN_KEY), None);
    store.remove(TOKEN_KEY).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    FileCredentialStore::new(&path).set(TOKEN_KEY, "jwt-1").unwrap();

    let reopened = FileCredentialStore::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("jwt-1"));

    reopened.remove(TOKEN_KEY).unwrap();
    assert_eq!(FileCredentialStore::new(&path).get(TOKEN_KEY), None);
}

#[test]
fn file_store_remove_twice_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.json"));
    store.set(TOKEN_KEY, "jwt").unwrap();
    store.remove(TOKEN_KEY).unwrap();
    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn file_store_torn_file_reads_none_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, r#"{"token": "abc"#).unwrap();

    let store = FileCredentialStore::new(&path);
    assert_eq!(store.get(TOKEN_KEY), None);
    store.remove(TOKEN_KEY).unwrap();

    store.set(TOKEN_KEY, "jwt").unwrap();
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("jwt"));
    assert_eq!(FileCredentialStore::new(&path).get(TOKEN_KEY).as_deref(), Some("jwt"));
}

#[test]
fn file_store_torn_file_session_clear_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "not json").unwrap();
    let session = Session::new(Arc::new(FileCredentialStore::new(&path)));

    session.clear().unwrap();
    assert!(!session.is_authenticated());

    session.save("fresh").unwrap();
    assert_eq!(session.token().as_deref(), Some("fresh"));
}

#[test]
fn file_store_write_leaves_no_staging_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::new(&path);

    store.set(TOKEN_KEY, "jwt-1").unwrap();
    store.set(TOKEN_KEY, "jwt-2").unwrap();
    store.remove(TOKEN_KEY).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("credentials.json")]);
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
}

// =========================================================================
// Session
// =========================================================================

#[test]
fn session_save_and_clear() {
    let session = Session::new(Arc::new(MemoryCredentialStore::new()));
    assert!(!session.is_authenticated());

    session.save("jwt").unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("jwt"));

    session.clear().unwrap();
    session.clear().unwrap();
    assert!(!session.is_authenticated());
}

#[test]
fn session_ignores_blank_token() {
    let session = Session::new(Arc::new(MemoryCredentialStore::with_token("   ")));
    assert_eq!(session.token(), None);
    assert!(!session.is_authenticated());
}

#[test]
fn session_debug_hides_token() {
    let session = Session::new(Arc::new(MemoryCredentialStore::with_token("secret-jwt")));
    let rendered = format!("{session:?}");
    assert!(!rendered.contains("secret-jwt"));
    assert!(rendered.contains("authenticated: true"));
}
