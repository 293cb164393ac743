/// Contact fields an uploaded column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Status,
    Comment,
    DateRappel,
    HeureRappel,
    DateRendezVous,
    HeureRendezVous,
    DateAppel,
    HeureAppel,
    DureeAppel,
    Source,
}

/// Lowercases a header and strips spaces, underscores and apostrophes, so
/// "Date d'appel" and "datedappel" land on the same synonym.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, ' ' | '_' | '\'' | '\u{2019}'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Static synonym table from normalized header to contact field. Unknown
/// headers are ignored by the importer.
pub fn map_header(raw: &str) -> Option<ContactField> {
    match normalize_header(raw).as_str() {
        "prénom" | "prenom" | "firstname" => Some(ContactField::FirstName),
        "nom" | "nomdefamille" | "lastname" => Some(ContactField::LastName),
        "courriel" | "mail" | "email" => Some(ContactField::Email),
        "téléphone" | "telephone" | "numero" | "numéro" | "phonenumber" => {
            Some(ContactField::PhoneNumber)
        }
        "statut" | "status" => Some(ContactField::Status),
        "commentaire" | "comment" => Some(ContactField::Comment),
        "rappel" | "daterappel" => Some(ContactField::DateRappel),
        "heurerappel" => Some(ContactField::HeureRappel),
        "daterendez-vous" | "daterendezvous" => Some(ContactField::DateRendezVous),
        "heurerendez-vous" | "heurerendezvous" => Some(ContactField::HeureRendezVous),
        "datedappel" | "dateappel" => Some(ContactField::DateAppel),
        "heureappel" => Some(ContactField::HeureAppel),
        "dureeappel" | "duréedappel" | "dureedappel" => Some(ContactField::DureeAppel),
        "source" => Some(ContactField::Source),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{map_header, normalize_header, ContactField};

    #[test]
    fn normalization_strips_separators_and_apostrophes() {
        assert_eq!(normalize_header("Date d'appel"), "datedappel");
        assert_eq!(normalize_header("Heure_Rappel"), "heurerappel");
        assert_eq!(normalize_header("Prénom "), "prénom");
    }

    #[test]
    fn french_synonyms_map_onto_contact_fields() {
        assert_eq!(map_header("Prénom"), Some(ContactField::FirstName));
        assert_eq!(map_header("prenom"), Some(ContactField::FirstName));
        assert_eq!(map_header("Nom de famille"), Some(ContactField::LastName));
        assert_eq!(map_header("Téléphone"), Some(ContactField::PhoneNumber));
        assert_eq!(map_header("Numéro"), Some(ContactField::PhoneNumber));
        assert_eq!(map_header("Courriel"), Some(ContactField::Email));
        assert_eq!(map_header("Rappel"), Some(ContactField::DateRappel));
        assert_eq!(map_header("Date d'appel"), Some(ContactField::DateAppel));
    }

    #[test]
    fn unknown_headers_are_ignored() {
        assert_eq!(map_header("Colonne mystère"), None);
        assert_eq!(map_header(""), None);
    }
}
