pub mod autosave;
pub mod backup;
pub mod error;
pub mod export;
pub mod paths;
pub mod table;

use crate::error::{Result, StoreError};
use phonebank_core::{dedupe_last_wins, normalize_phone, Contact, ContactDraft, ContactId, ContactPatch};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, info};

/// Outcome of an import merge, for logging and reports.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MergeStats {
    pub incoming: usize,
    pub total: usize,
}

/// The single source of truth for contact records.
///
/// Every operation re-reads the on-disk table, mutates an in-memory copy and
/// rewrites the file wholesale. Mutations serialize behind an internal mutex
/// so two concurrent read-modify-write cycles cannot lose an update.
pub struct Store {
    table_path: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn open(table_path: impl Into<PathBuf>) -> Self {
        Self {
            table_path: table_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }

    /// Returns every record. An unreadable table degrades to an empty list;
    /// availability is preferred over strictness here.
    pub fn list_all(&self) -> Vec<Contact> {
        match table::read(&self.table_path) {
            Ok(contacts) => contacts,
            Err(err) => {
                error!(path = %self.table_path.display(), error = %err, "unreadable contact table, listing as empty");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: ContactId) -> Option<Contact> {
        self.list_all().into_iter().find(|c| c.id == id)
    }

    pub fn create(&self, mut draft: ContactDraft) -> Result<Contact> {
        draft.phone_number = draft
            .phone_number
            .as_deref()
            .and_then(normalize_phone);

        let _guard = self.lock_writes();
        let mut contacts = table::read(&self.table_path)?;

        if let Some(email) = draft.email.as_deref().filter(|e| !e.is_empty()) {
            if contacts.iter().any(|c| c.email.as_deref() == Some(email)) {
                return Err(StoreError::DuplicateEmail(email.to_string()));
            }
        }
        if draft.first_name.is_some() || draft.last_name.is_some() {
            let collision = contacts.iter().any(|c| {
                c.first_name == draft.first_name && c.last_name == draft.last_name
            });
            if collision {
                return Err(StoreError::DuplicateName(format!(
                    "{} {}",
                    draft.first_name.as_deref().unwrap_or_default(),
                    draft.last_name.as_deref().unwrap_or_default()
                )));
            }
        }

        let contact = draft.into_contact(ContactId::new());
        contacts.push(contact.clone());
        table::write(&self.table_path, &contacts)?;
        info!(id = %contact.id, "contact created");
        Ok(contact)
    }

    pub fn update(&self, id: ContactId, mut patch: ContactPatch) -> Result<Contact> {
        // Renormalize a supplied phone number; an explicit null stays a clear.
        if let Some(Some(raw)) = patch.phone_number.as_ref() {
            patch.phone_number = Some(normalize_phone(raw));
        }

        let _guard = self.lock_writes();
        let mut contacts = table::read(&self.table_path)?;
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if patch.is_empty() {
            return Ok(contacts[index].clone());
        }

        if let Some(Some(new_email)) = patch.email.as_ref() {
            let changed = contacts[index].email.as_deref() != Some(new_email.as_str());
            if changed
                && contacts
                    .iter()
                    .enumerate()
                    .any(|(i, c)| i != index && c.email.as_deref() == Some(new_email.as_str()))
            {
                return Err(StoreError::DuplicateEmail(new_email.clone()));
            }
        }

        contacts[index].apply_patch(patch);
        let updated = contacts[index].clone();
        table::write(&self.table_path, &contacts)?;
        Ok(updated)
    }

    pub fn delete(&self, id: ContactId) -> Result<()> {
        let _guard = self.lock_writes();
        let mut contacts = table::read(&self.table_path)?;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        table::write(&self.table_path, &contacts)?;
        info!(id = %id, "contact deleted");
        Ok(())
    }

    /// Clears the whole table. Idempotent: a missing table is already clear.
    pub fn delete_all(&self) -> Result<()> {
        let _guard = self.lock_writes();
        if self.table_path.exists() {
            std::fs::remove_file(&self.table_path)?;
            info!(path = %self.table_path.display(), "contact table removed");
        }
        Ok(())
    }

    /// Concatenates imported rows onto the table and deduplicates with
    /// last-write-wins on (firstName, lastName, email), so imported rows
    /// replace stored ones that collide on that key.
    pub fn merge_imported(&self, rows: Vec<Contact>) -> Result<MergeStats> {
        let incoming = rows.len();
        let _guard = self.lock_writes();
        let mut contacts = table::read(&self.table_path)?;
        contacts.extend(rows);
        let merged = dedupe_last_wins(contacts);
        table::write(&self.table_path, &merged)?;
        Ok(MergeStats {
            incoming,
            total: merged.len(),
        })
    }

    /// Full-table export as delimited text.
    pub fn export_csv(&self) -> Result<String> {
        let contacts = table::read(&self.table_path)?;
        export::to_csv(&contacts)
    }

    /// Full-table export in the binary table format.
    pub fn export_table(&self) -> Result<Vec<u8>> {
        let contacts = table::read(&self.table_path)?;
        table::encode(&contacts)
    }

    fn lock_writes(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
