pub mod columns;
pub mod error;

mod sheet;

use crate::columns::{map_header, ContactField};
use crate::error::{ImportError, Result};
use phonebank_core::{normalize_phone, Contact, ContactDraft, ContactId};
use phonebank_store::Store;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Declared kind of an uploaded tabular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Csv,
    Xlsx,
    /// Legacy binary Excel workbooks, which need their own reader.
    Xls,
}

impl ImportKind {
    /// Maps a declared content type onto a supported kind.
    pub fn from_content_type(content_type: &str) -> Result<Self> {
        match content_type.trim() {
            "text/csv" => Ok(Self::Csv),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Ok(Self::Xlsx),
            "application/vnd.ms-excel" => Ok(Self::Xls),
            other => Err(ImportError::UnsupportedKind(other.to_string())),
        }
    }

    /// Infers the kind from a file name, for callers that only have a path.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Ok(Self::Csv)
        } else if lower.ends_with(".xlsx") {
            Ok(Self::Xlsx)
        } else if lower.ends_with(".xls") {
            Ok(Self::Xls)
        } else {
            Err(ImportError::UnsupportedKind(name.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImportReport {
    /// Rows that survived filtering and were handed to the merge.
    pub imported: usize,
    /// Table size after the merge.
    pub total: usize,
}

/// Parses the uploaded bytes and merges the surviving rows into the store.
pub fn process_import(store: &Store, bytes: &[u8], kind: ImportKind) -> Result<ImportReport> {
    let rows = parse_rows(bytes, kind)?;
    if rows.is_empty() {
        return Ok(ImportReport {
            imported: 0,
            total: store.list_all().len(),
        });
    }
    let imported = rows.len();
    let stats = store.merge_imported(rows)?;
    Ok(ImportReport {
        imported,
        total: stats.total,
    })
}

/// Receipt for a merge accepted for background processing. The task runs
/// detached; its outcome is only observable via logs.
pub struct ImportTicket {
    pub kind: ImportKind,
    pub size_bytes: usize,
    handle: JoinHandle<()>,
}

impl ImportTicket {
    /// Waits for the background merge, for callers that cannot outlive it
    /// (the CLI process, tests). The outcome stays log-only either way.
    pub async fn finished(self) {
        let _ = self.handle.await;
    }
}

/// Accepts an uploaded file for processing and returns immediately. Merge
/// failures are never reported back to the acceptor.
pub fn spawn_merge(store: Arc<Store>, bytes: Vec<u8>, kind: ImportKind) -> ImportTicket {
    let size_bytes = bytes.len();
    let handle = tokio::spawn(async move {
        match process_import(&store, &bytes, kind) {
            Ok(report) => {
                info!(
                    imported = report.imported,
                    total = report.total,
                    "background import merged"
                );
            }
            Err(err) => {
                error!(error = %err, "background import failed");
            }
        }
    });
    ImportTicket {
        kind,
        size_bytes,
        handle,
    }
}

/// Parses the file into contact rows: maps headers through the synonym
/// table, drops rows missing the available name columns, assigns fresh ids,
/// normalizes phone numbers and coerces the remaining fields to non-null
/// strings.
pub fn parse_rows(bytes: &[u8], kind: ImportKind) -> Result<Vec<Contact>> {
    let (headers, records) = match kind {
        ImportKind::Csv => sheet::read_csv(bytes)?,
        ImportKind::Xlsx => sheet::read_xlsx(bytes)?,
        ImportKind::Xls => sheet::read_xls(bytes)?,
    };

    let mapping: Vec<Option<ContactField>> =
        headers.iter().map(|h| map_header(h)).collect();
    let has_first = mapping.contains(&Some(ContactField::FirstName));
    let has_last = mapping.contains(&Some(ContactField::LastName));
    if !has_first && !has_last {
        return Err(ImportError::NoNameColumn);
    }

    let mut contacts = Vec::new();
    for record in records {
        let mut fields: HashMap<ContactField, String> = HashMap::new();
        for (index, value) in record.into_iter().enumerate() {
            let Some(Some(field)) = mapping.get(index) else {
                continue;
            };
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                fields.insert(*field, trimmed.to_string());
            }
        }

        // Rows missing whichever name columns the file carries are dropped.
        if has_first && !fields.contains_key(&ContactField::FirstName) {
            continue;
        }
        if has_last && !fields.contains_key(&ContactField::LastName) {
            continue;
        }

        contacts.push(build_contact(fields));
    }

    Ok(contacts)
}

fn build_contact(mut fields: HashMap<ContactField, String>) -> Contact {
    let phone_number = fields
        .remove(&ContactField::PhoneNumber)
        .as_deref()
        .and_then(normalize_phone);
    let mut take = |field: ContactField| Some(fields.remove(&field).unwrap_or_default());

    let draft = ContactDraft {
        first_name: take(ContactField::FirstName),
        last_name: take(ContactField::LastName),
        email: take(ContactField::Email),
        phone_number,
        status: take(ContactField::Status),
        comment: take(ContactField::Comment),
        date_rappel: take(ContactField::DateRappel),
        heure_rappel: take(ContactField::HeureRappel),
        date_rendez_vous: take(ContactField::DateRendezVous),
        heure_rendez_vous: take(ContactField::HeureRendezVous),
        date_appel: take(ContactField::DateAppel),
        heure_appel: take(ContactField::HeureAppel),
        duree_appel: take(ContactField::DureeAppel),
        call_start_time: None,
        source: take(ContactField::Source),
    };
    draft.into_contact(ContactId::new())
}
