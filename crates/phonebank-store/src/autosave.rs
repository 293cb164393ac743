use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Sibling persistence area: arbitrary CSV text files addressed by a
/// caller-supplied relative path. These files live outside the contact
/// table's consistency rules.
pub struct AutosaveArea {
    dir: PathBuf,
}

impl AutosaveArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes CSV data under the given relative path, creating intermediate
    /// directories and dropping blank lines. Paths escaping the area are
    /// rejected.
    pub fn save(&self, relative_path: &str, csv_data: &str) -> Result<PathBuf> {
        let relative = sanitize_relative(relative_path)?;
        let target = self.dir.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let cleaned: Vec<&str> = csv_data
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        fs::write(&target, cleaned.join("\n"))?;
        Ok(target)
    }

    pub fn exists(&self, file_name: &str) -> bool {
        let target = self.dir.join(Path::new(file_name).file_name().unwrap_or_default());
        target.is_file()
    }

    pub fn load(&self, file_name: &str) -> Result<String> {
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| StoreError::InvalidDataPath(PathBuf::from(file_name)))?;
        let target = self.dir.join(name);
        if !target.is_file() {
            return Err(StoreError::NotFound(file_name.to_string()));
        }
        Ok(fs::read_to_string(target)?)
    }
}

fn sanitize_relative(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidDataPath(PathBuf::from(raw)));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => return Err(StoreError::InvalidDataPath(PathBuf::from(raw))),
        }
    }
    Ok(path.to_path_buf())
}
