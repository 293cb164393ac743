use crate::error::Result;
use phonebank_core::Contact;

/// Column order of the delimited export, matching the import vocabulary.
pub const CSV_HEADERS: [&str; 16] = [
    "id",
    "firstName",
    "lastName",
    "email",
    "phoneNumber",
    "status",
    "comment",
    "dateRappel",
    "heureRappel",
    "dateRendezVous",
    "heureRendezVous",
    "dateAppel",
    "heureAppel",
    "dureeAppel",
    "callStartTime",
    "source",
];

pub fn to_csv(contacts: &[Contact]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for contact in contacts {
        writer.write_record(record_for(contact))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())?;
    // The writer only ever receives UTF-8 fields.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn record_for(contact: &Contact) -> Vec<String> {
    fn cell(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }

    vec![
        contact.id.to_string(),
        cell(&contact.first_name),
        cell(&contact.last_name),
        cell(&contact.email),
        cell(&contact.phone_number),
        cell(&contact.status),
        cell(&contact.comment),
        cell(&contact.date_rappel),
        cell(&contact.heure_rappel),
        cell(&contact.date_rendez_vous),
        cell(&contact.heure_rendez_vous),
        cell(&contact.date_appel),
        cell(&contact.heure_appel),
        cell(&contact.duree_appel),
        cell(&contact.call_start_time),
        cell(&contact.source),
    ]
}
