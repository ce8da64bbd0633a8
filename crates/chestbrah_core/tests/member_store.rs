use chestbrah_core::{
    AbsentGroup, CsvMemberStore, FixedClock, Member, MemberStore, StoreError, StoreOptions,
    UserValidationError,
};
use std::fs;

fn clock() -> FixedClock {
    FixedClock::new("2011-08-05 12:00:00")
}

#[test]
fn save_and_load_two_users() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("test_users.csv"));

    let users = vec![
        Member::regular("Zyzz", "zyzz@mirin.com", &clock()).unwrap(),
        Member::regular("Chestbrah", "chest@brah.com", &clock()).unwrap(),
    ];
    store.save(&users).unwrap();

    let outcome = store.load().unwrap();
    assert!(outcome.source_found);
    assert_eq!(outcome.members.len(), 2);
    assert_eq!(outcome.members[0].name(), "Zyzz");
    assert_eq!(outcome.members[1].email(), "chest@brah.com");
}

#[test]
fn save_writes_exact_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let store = CsvMemberStore::new(&path);

    let members = vec![
        Member::regular("Zyzz", "zyzz@mirin.com", &clock()).unwrap(),
        Member::gym_bro("Chestbrah", "chest@brah.com", "Bondi, NSW", &clock()).unwrap(),
    ];
    store.save(&members).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "name,email,timestamp,group\n\
         Zyzz,zyzz@mirin.com,2011-08-05 12:00:00,N/A\n\
         Chestbrah,chest@brah.com,2011-08-05 12:00:00,\"Bondi, NSW\"\n"
    );
}

#[test]
fn roundtrip_preserves_fields_and_variants() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("roster.csv"));

    let members = vec![
        Member::gym_bro("Said", "said@aziz.com", "Gold's \"Venice\", CA", &clock()).unwrap(),
        Member::regular("Zyzz", "zyzz@mirin.com", &FixedClock::new("1989-03-24 06:30:00"))
            .unwrap(),
        Member::gym_bro("Chestbrah", "chest@brah.com", "", &clock()).unwrap(),
    ];
    store.save(&members).unwrap();

    let loaded = store.load().unwrap().members;
    assert_eq!(loaded, members);
    assert_eq!(loaded[1].created_at(), "1989-03-24 06:30:00");
    assert!(!loaded[1].is_gym_bro());
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("roster.csv"));

    let first = vec![
        Member::regular("Zyzz", "zyzz@mirin.com", &clock()).unwrap(),
        Member::regular("Chestbrah", "chest@brah.com", &clock()).unwrap(),
    ];
    store.save(&first).unwrap();
    store.save(&first[1..]).unwrap();

    let loaded = store.load().unwrap().members;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name(), "Chestbrah");
}

#[test]
fn empty_roster_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let store = CsvMemberStore::new(&path);

    store.save(&[]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "name,email,timestamp,group\n");
    let outcome = store.load().unwrap();
    assert!(outcome.source_found);
    assert!(outcome.members.is_empty());
}

#[test]
fn load_missing_file_returns_empty_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("does-not-exist.csv"));

    let outcome = store.load().unwrap();
    assert!(!outcome.source_found);
    assert!(outcome.members.is_empty());
}

#[test]
fn load_rejects_corrupted_email_with_row_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "name,email,timestamp,group\n\
         Zyzz,zyzz@mirin.com,2011-08-05 12:00:00,N/A\n\
         Chestbrah,chest-at-brah,2011-08-05 12:00:00,Bondi\n",
    )
    .unwrap();

    let err = CsvMemberStore::new(&path).load().unwrap_err();
    match err {
        StoreError::Validation { row, source } => {
            assert_eq!(row, 2);
            assert_eq!(
                source,
                UserValidationError::InvalidEmail("chest-at-brah".to_string())
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_rejects_blank_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "name,email,timestamp,group\n,zyzz@mirin.com,2011-08-05 12:00:00,N/A\n",
    )
    .unwrap();

    let err = CsvMemberStore::new(&path).load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation {
            row: 1,
            source: UserValidationError::MissingName
        }
    ));
}

#[test]
fn load_rejects_unexpected_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "name,email,timestamp,gym\nZyzz,zyzz@mirin.com,2011-08-05 12:00:00,N/A\n",
    )
    .unwrap();

    let err = CsvMemberStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)), "unexpected error: {err}");
}

#[test]
fn load_rejects_short_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "name,email,timestamp,group\nZyzz,zyzz@mirin.com\n",
    )
    .unwrap();

    let err = CsvMemberStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Csv(_)), "unexpected error: {err}");
}

#[test]
fn sentinel_gym_name_collides_under_default_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("roster.csv"));

    let members = vec![Member::gym_bro("Zyzz", "zyzz@mirin.com", "N/A", &clock()).unwrap()];
    store.save(&members).unwrap();

    let loaded = store.load().unwrap().members;
    assert!(!loaded[0].is_gym_bro());
}

#[test]
fn blank_encoding_keeps_gym_named_like_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    let store = CsvMemberStore::with_options(
        &path,
        StoreOptions {
            absent_group: AbsentGroup::Blank,
        },
    );

    let members = vec![
        Member::gym_bro("Zyzz", "zyzz@mirin.com", "N/A", &clock()).unwrap(),
        Member::regular("Chestbrah", "chest@brah.com", &clock()).unwrap(),
    ];
    store.save(&members).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("Chestbrah,chest@brah.com,2011-08-05 12:00:00,\n"));

    let loaded = store.load().unwrap().members;
    assert_eq!(loaded, members);
    assert_eq!(loaded[0].gym(), Some("N/A"));
}

#[test]
fn load_empty_file_returns_no_members() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.csv");
    fs::write(&path, "").unwrap();

    let outcome = CsvMemberStore::new(&path).load().unwrap();
    assert!(outcome.source_found);
    assert!(outcome.members.is_empty());
}

#[test]
fn save_into_missing_directory_fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvMemberStore::new(dir.path().join("missing/x.csv"));

    let members = vec![Member::regular("Zyzz", "zyzz@mirin.com", &clock()).unwrap()];
    let err = store.save(&members).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)), "unexpected error: {err}");
    assert!(!store.path().exists());
}
