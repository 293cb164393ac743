use crate::error::invalid_input;
use anyhow::Result;
use chrono::FixedOffset;
use phonebank_core::ContactId;
use std::str::FromStr;

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("contact id cannot be empty"));
    }
    ContactId::from_str(trimmed).map_err(|_| invalid_input("invalid contact id"))
}

/// Offsets are validated at config load, so the conversion cannot fail for
/// a loaded config; fall back to UTC rather than panic.
pub fn display_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
}

/// An empty or whitespace flag value clears the field.
pub fn normalize_optional_value(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
