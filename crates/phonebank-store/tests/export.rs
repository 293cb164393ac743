use phonebank_core::{Contact, ContactDraft};
use phonebank_store::Store;
use tempfile::TempDir;

#[test]
fn csv_export_writes_headers_and_one_row_per_contact() {
    let temp = TempDir::new().expect("temp dir");
    let store = Store::open(temp.path().join("contacts.bin"));

    store
        .create(ContactDraft {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            phone_number: Some("0612345678".to_string()),
            ..Default::default()
        })
        .expect("create");

    let csv = store.export_csv().expect("export");
    let mut lines = csv.lines();
    let header = lines.next().expect("header line");
    assert!(header.starts_with("id,firstName,lastName,email,phoneNumber"));

    let row = lines.next().expect("data row");
    assert!(row.contains("Ada"));
    assert!(row.contains("+33 6 12 34 56 78"));
    assert!(lines.next().is_none());
}

#[test]
fn csv_export_of_an_empty_table_is_headers_only() {
    let temp = TempDir::new().expect("temp dir");
    let store = Store::open(temp.path().join("contacts.bin"));

    let csv = store.export_csv().expect("export");
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn table_export_roundtrips_through_the_binary_codec() {
    let temp = TempDir::new().expect("temp dir");
    let store = Store::open(temp.path().join("contacts.bin"));

    let created = store
        .create(ContactDraft {
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            ..Default::default()
        })
        .expect("create");

    let bytes = store.export_table().expect("export");
    let decoded: Vec<Contact> = bincode::deserialize(&bytes).expect("decode");
    assert_eq!(decoded, vec![created]);
}
