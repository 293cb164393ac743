use crate::error::Result;
use crate::paths;
use phonebank_core::Contact;
use std::fs;
use std::path::Path;

/// Reads the whole table. An absent or zero-length file is an empty table;
/// decode failures surface so callers can choose their own degradation.
pub fn read(path: &Path) -> Result<Vec<Contact>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    Ok(bincode::deserialize(&bytes)?)
}

/// Rewrites the whole table. The file is replaced via a sibling temp file
/// and rename so readers never observe a half-written table.
pub fn write(path: &Path, contacts: &[Contact]) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    let bytes = encode(contacts)?;
    let tmp = tmp_path(path);
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn encode(contacts: &[Contact]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(contacts)?)
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "contacts.bin".into());
    name.push(".tmp");
    path.with_file_name(name)
}
