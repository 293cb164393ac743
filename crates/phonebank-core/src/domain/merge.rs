use crate::domain::contact::Contact;
use std::collections::HashMap;

/// Deduplicates a combined contact table on the (firstName, lastName, email)
/// key, keeping the last occurrence so freshly imported rows replace stored
/// ones that collide. A missing field and an empty string count as the same
/// key component. Relative order of the surviving rows is preserved.
pub fn dedupe_last_wins(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut last_index: HashMap<(String, String, String), usize> = HashMap::new();
    for (index, contact) in contacts.iter().enumerate() {
        last_index.insert(merge_key(contact), index);
    }

    contacts
        .into_iter()
        .enumerate()
        .filter(|(index, contact)| last_index.get(&merge_key(contact)) == Some(index))
        .map(|(_, contact)| contact)
        .collect()
}

fn merge_key(contact: &Contact) -> (String, String, String) {
    (
        contact.first_name.clone().unwrap_or_default(),
        contact.last_name.clone().unwrap_or_default(),
        contact.email.clone().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::dedupe_last_wins;
    use crate::domain::contact::{Contact, ContactDraft};
    use crate::domain::ids::ContactId;

    fn contact(first: &str, last: &str, email: Option<&str>, status: &str) -> Contact {
        ContactDraft {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: email.map(str::to_string),
            status: Some(status.to_string()),
            ..Default::default()
        }
        .into_contact(ContactId::new())
    }

    #[test]
    fn later_row_replaces_colliding_earlier_row() {
        let merged = dedupe_last_wins(vec![
            contact("Ada", "Lovelace", Some("ada@example.com"), "old"),
            contact("Alan", "Turing", Some("alan@example.com"), "old"),
            contact("Ada", "Lovelace", Some("ada@example.com"), "new"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].first_name.as_deref(), Some("Alan"));
        assert_eq!(merged[1].status.as_deref(), Some("new"));
    }

    #[test]
    fn missing_email_and_empty_email_collide() {
        let mut second = contact("Ada", "Lovelace", None, "new");
        second.email = Some(String::new());
        let merged = dedupe_last_wins(vec![
            contact("Ada", "Lovelace", None, "old"),
            second,
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].status.as_deref(), Some("new"));
    }

    #[test]
    fn distinct_keys_all_survive_in_order() {
        let merged = dedupe_last_wins(vec![
            contact("Ada", "Lovelace", Some("ada@example.com"), "a"),
            contact("Ada", "Lovelace", Some("ada@other.org"), "b"),
            contact("Grace", "Hopper", Some("grace@example.com"), "c"),
        ]);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].first_name.as_deref(), Some("Grace"));
    }
}
