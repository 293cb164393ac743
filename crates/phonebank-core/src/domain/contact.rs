use crate::domain::ids::ContactId;
use serde::{Deserialize, Serialize};

/// A single contact row in the phone-bank table. Field names follow the
/// sheet vocabulary the operators work with, hence the French call-history
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Always in canonical dialable form when present.
    pub phone_number: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub date_rappel: Option<String>,
    pub heure_rappel: Option<String>,
    pub date_rendez_vous: Option<String>,
    pub heure_rendez_vous: Option<String>,
    pub date_appel: Option<String>,
    pub heure_appel: Option<String>,
    pub duree_appel: Option<String>,
    /// ISO-8601 UTC instant marking an in-progress call.
    pub call_start_time: Option<String>,
    pub source: Option<String>,
}

/// Input for contact creation; the store assigns the id and normalizes the
/// phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<String>,
    pub comment: Option<String>,
    pub date_rappel: Option<String>,
    pub heure_rappel: Option<String>,
    pub date_rendez_vous: Option<String>,
    pub heure_rendez_vous: Option<String>,
    pub date_appel: Option<String>,
    pub heure_appel: Option<String>,
    pub duree_appel: Option<String>,
    pub call_start_time: Option<String>,
    pub source: Option<String>,
}

impl ContactDraft {
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            status: self.status,
            comment: self.comment,
            date_rappel: self.date_rappel,
            heure_rappel: self.heure_rappel,
            date_rendez_vous: self.date_rendez_vous,
            heure_rendez_vous: self.heure_rendez_vous,
            date_appel: self.date_appel,
            heure_appel: self.heure_appel,
            duree_appel: self.duree_appel,
            call_start_time: self.call_start_time,
            source: self.source,
        }
    }
}

/// Partial update. The outer `Option` distinguishes "field absent from the
/// request" from "field present"; the inner `Option` carries an explicit
/// clear for the fields that accept one.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone_number: Option<Option<String>>,
    pub status: Option<Option<String>>,
    pub comment: Option<Option<String>>,
    pub date_rappel: Option<Option<String>>,
    pub heure_rappel: Option<Option<String>>,
    pub date_rendez_vous: Option<Option<String>>,
    pub heure_rendez_vous: Option<Option<String>>,
    pub date_appel: Option<Option<String>>,
    pub heure_appel: Option<Option<String>>,
    pub duree_appel: Option<Option<String>>,
    pub call_start_time: Option<Option<String>>,
    pub source: Option<Option<String>>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.status.is_none()
            && self.comment.is_none()
            && self.date_rappel.is_none()
            && self.heure_rappel.is_none()
            && self.date_rendez_vous.is_none()
            && self.heure_rendez_vous.is_none()
            && self.date_appel.is_none()
            && self.heure_appel.is_none()
            && self.duree_appel.is_none()
            && self.call_start_time.is_none()
            && self.source.is_none()
    }
}

impl Contact {
    /// Applies a partial update in place. Date, time, duration, email,
    /// phone number and call-start fields honor an explicit clear; the
    /// remaining fields only change when a non-null value is supplied.
    pub fn apply_patch(&mut self, patch: ContactPatch) {
        if let Some(Some(value)) = patch.first_name {
            self.first_name = Some(value);
        }
        if let Some(Some(value)) = patch.last_name {
            self.last_name = Some(value);
        }
        if let Some(Some(value)) = patch.status {
            self.status = Some(value);
        }
        if let Some(Some(value)) = patch.comment {
            self.comment = Some(value);
        }
        if let Some(Some(value)) = patch.source {
            self.source = Some(value);
        }

        if let Some(value) = patch.email {
            self.email = value;
        }
        if let Some(value) = patch.phone_number {
            self.phone_number = value;
        }
        if let Some(value) = patch.date_rappel {
            self.date_rappel = value;
        }
        if let Some(value) = patch.heure_rappel {
            self.heure_rappel = value;
        }
        if let Some(value) = patch.date_rendez_vous {
            self.date_rendez_vous = value;
        }
        if let Some(value) = patch.heure_rendez_vous {
            self.heure_rendez_vous = value;
        }
        if let Some(value) = patch.date_appel {
            self.date_appel = value;
        }
        if let Some(value) = patch.heure_appel {
            self.heure_appel = value;
        }
        if let Some(value) = patch.duree_appel {
            self.duree_appel = value;
        }
        if let Some(value) = patch.call_start_time {
            self.call_start_time = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactDraft, ContactPatch};
    use crate::domain::ids::ContactId;

    fn base_contact() -> Contact {
        ContactDraft {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone_number: Some("+33 6 12 34 56 78".to_string()),
            comment: Some("first pass".to_string()),
            ..Default::default()
        }
        .into_contact(ContactId::new())
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut contact = base_contact();
        let before = contact.clone();
        contact.apply_patch(ContactPatch::default());
        assert_eq!(contact, before);
    }

    #[test]
    fn explicit_null_clears_nullable_fields() {
        let mut contact = base_contact();
        contact.apply_patch(ContactPatch {
            email: Some(None),
            phone_number: Some(None),
            ..Default::default()
        });
        assert!(contact.email.is_none());
        assert!(contact.phone_number.is_none());
    }

    #[test]
    fn explicit_null_is_ignored_for_name_fields() {
        let mut contact = base_contact();
        contact.apply_patch(ContactPatch {
            first_name: Some(None),
            comment: Some(None),
            ..Default::default()
        });
        assert_eq!(contact.first_name.as_deref(), Some("Ada"));
        assert_eq!(contact.comment.as_deref(), Some("first pass"));
    }

    #[test]
    fn patch_sets_supplied_values() {
        let mut contact = base_contact();
        contact.apply_patch(ContactPatch {
            status: Some(Some("rappel".to_string())),
            duree_appel: Some(Some("02:05".to_string())),
            ..Default::default()
        });
        assert_eq!(contact.status.as_deref(), Some("rappel"));
        assert_eq!(contact.duree_appel.as_deref(), Some("02:05"));
    }
}
