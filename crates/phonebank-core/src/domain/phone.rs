/// Normalizes a raw phone value into the canonical dialable form.
///
/// French numbers come out as `+33 D DD DD DD DD`; other international
/// numbers keep their cleaned `+`-prefixed form; anything else is returned
/// as cleaned digits. Returns `None` when nothing dialable remains.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let mut cleaned = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() || ch == '+' {
            cleaned.push(ch);
        }
    }
    if !cleaned.starts_with('+') {
        cleaned.retain(|ch| ch.is_ascii_digit());
    }

    if !cleaned.chars().any(|ch| ch.is_ascii_digit()) {
        return None;
    }

    // Already international French: +33 followed by nine digits.
    if let Some(rest) = cleaned.strip_prefix("+33") {
        if rest.len() == 9 && all_digits(rest) {
            return Some(space_national(rest));
        }
    }

    // National French: leading 0 followed by nine digits.
    if let Some(rest) = cleaned.strip_prefix('0') {
        if cleaned.len() == 10 && all_digits(&cleaned) {
            return Some(space_national(rest));
        }
    }

    // International French without the plus.
    if let Some(rest) = cleaned.strip_prefix("33") {
        if cleaned.len() == 11 && all_digits(&cleaned) {
            return Some(space_national(rest));
        }
    }

    // Bare nine-digit French number (mobile or landline prefix 1-7).
    if cleaned.len() == 9
        && all_digits(&cleaned)
        && matches!(cleaned.as_bytes()[0], b'1'..=b'7')
    {
        return Some(space_national(&cleaned));
    }

    // Non-French international number, or a malformed +33 that fell through
    // the checks above.
    if cleaned.starts_with('+') {
        return Some(cleaned);
    }

    Some(cleaned)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|ch| ch.is_ascii_digit())
}

/// Spaces a nine-digit national part into the five display groups.
fn space_national(national: &str) -> String {
    debug_assert_eq!(national.len(), 9);
    format!(
        "+33 {} {} {} {} {}",
        &national[0..1],
        &national[1..3],
        &national[3..5],
        &national[5..7],
        &national[7..9]
    )
}
