use phonebank_core::{ContactDraft, ContactId, ContactPatch};
use phonebank_store::error::StoreErrorKind;
use phonebank_store::Store;
use tempfile::TempDir;

fn open_store(temp: &TempDir) -> Store {
    Store::open(temp.path().join("contacts.bin"))
}

fn draft(first: &str, last: &str) -> ContactDraft {
    ContactDraft {
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        ..Default::default()
    }
}

#[test]
fn create_normalizes_the_phone_number() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    let created = store
        .create(ContactDraft {
            phone_number: Some("06 12 34 56 78".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create");
    assert_eq!(created.phone_number.as_deref(), Some("+33 6 12 34 56 78"));

    let fetched = store.get(created.id).expect("contact exists");
    assert_eq!(fetched.phone_number.as_deref(), Some("+33 6 12 34 56 78"));
}

#[test]
fn duplicate_email_is_rejected_on_create() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    store
        .create(ContactDraft {
            email: Some("ada@example.com".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create first");

    let err = store
        .create(ContactDraft {
            email: Some("ada@example.com".to_string()),
            ..draft("Grace", "Hopper")
        })
        .expect_err("duplicate email");
    assert_eq!(err.kind(), StoreErrorKind::DuplicateEmail);

    store
        .create(ContactDraft {
            email: Some("grace@example.com".to_string()),
            ..draft("Grace", "Hopper")
        })
        .expect("fresh email succeeds");
}

#[test]
fn duplicate_name_pair_is_rejected_on_create() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    store.create(draft("Ada", "Lovelace")).expect("create first");
    let err = store
        .create(draft("Ada", "Lovelace"))
        .expect_err("duplicate name pair");
    assert_eq!(err.kind(), StoreErrorKind::DuplicateName);
}

#[test]
fn empty_patch_returns_the_record_unchanged() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    let created = store
        .create(ContactDraft {
            status: Some("nouveau".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create");

    let updated = store
        .update(created.id, ContactPatch::default())
        .expect("empty patch");
    assert_eq!(updated, created);
}

#[test]
fn explicit_null_clears_the_phone_number() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    let created = store
        .create(ContactDraft {
            phone_number: Some("0612345678".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create");

    let updated = store
        .update(
            created.id,
            ContactPatch {
                phone_number: Some(None),
                ..Default::default()
            },
        )
        .expect("clear phone");
    assert!(updated.phone_number.is_none());
    assert!(store.get(created.id).expect("fetch").phone_number.is_none());
}

#[test]
fn update_renormalizes_a_supplied_phone_number() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    let created = store.create(draft("Ada", "Lovelace")).expect("create");
    let updated = store
        .update(
            created.id,
            ContactPatch {
                phone_number: Some(Some("33612345678".to_string())),
                ..Default::default()
            },
        )
        .expect("update phone");
    assert_eq!(updated.phone_number.as_deref(), Some("+33 6 12 34 56 78"));
}

#[test]
fn email_change_rechecks_uniqueness_excluding_self() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    let ada = store
        .create(ContactDraft {
            email: Some("ada@example.com".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create ada");
    store
        .create(ContactDraft {
            email: Some("grace@example.com".to_string()),
            ..draft("Grace", "Hopper")
        })
        .expect("create grace");

    // Re-submitting the unchanged email is fine.
    store
        .update(
            ada.id,
            ContactPatch {
                email: Some(Some("ada@example.com".to_string())),
                ..Default::default()
            },
        )
        .expect("same email accepted");

    let err = store
        .update(
            ada.id,
            ContactPatch {
                email: Some(Some("grace@example.com".to_string())),
                ..Default::default()
            },
        )
        .expect_err("colliding email rejected");
    assert_eq!(err.kind(), StoreErrorKind::DuplicateEmail);
}

#[test]
fn update_unknown_id_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);
    store.create(draft("Ada", "Lovelace")).expect("create");

    let err = store
        .update(
            ContactId::new(),
            ContactPatch {
                status: Some(Some("x".to_string())),
                ..Default::default()
            },
        )
        .expect_err("unknown id");
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn delete_unknown_id_is_not_found() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);
    store.create(draft("Ada", "Lovelace")).expect("create");

    let err = store.delete(ContactId::new()).expect_err("unknown id");
    assert_eq!(err.kind(), StoreErrorKind::NotFound);
}

#[test]
fn delete_all_is_idempotent_and_empties_the_table() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    store.delete_all().expect("delete on empty store");

    store.create(draft("Ada", "Lovelace")).expect("create");
    store.create(draft("Grace", "Hopper")).expect("create");
    store.delete_all().expect("delete all");
    assert!(store.list_all().is_empty());
    store.delete_all().expect("second delete is a no-op");
}

#[test]
fn corrupted_table_lists_as_empty() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.bin");
    std::fs::write(&path, b"\xff\xfejunk junk junk").expect("write junk");

    let store = Store::open(path);
    assert!(store.list_all().is_empty());
}

#[test]
fn merge_imported_keeps_the_last_colliding_row() {
    let temp = TempDir::new().expect("temp dir");
    let store = open_store(&temp);

    store
        .create(ContactDraft {
            email: Some("ada@example.com".to_string()),
            status: Some("ancien".to_string()),
            ..draft("Ada", "Lovelace")
        })
        .expect("create");

    let imported = ContactDraft {
        email: Some("ada@example.com".to_string()),
        status: Some("importé".to_string()),
        ..draft("Ada", "Lovelace")
    }
    .into_contact(ContactId::new());

    let stats = store.merge_imported(vec![imported]).expect("merge");
    assert_eq!(stats.incoming, 1);
    assert_eq!(stats.total, 1);

    let all = store.list_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status.as_deref(), Some("importé"));
}
