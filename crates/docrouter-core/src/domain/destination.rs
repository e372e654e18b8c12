//! Department to destination subpath mapping
//!
//! Destination templates are relative paths such as
//! `3 CONTABIL/{year}/3 ROTINAS AUTOMATICAS/FOLHA`. Segments may be split by
//! `/` or `\` and are re-joined with the host separator. The `{year}`
//! placeholder is expanded once, when the mapping is built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::errors::DomainError;
use super::newtypes::DepartmentName;

/// Placeholder replaced by the calendar year in destination templates.
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Expands a destination template into a relative path.
///
/// # Errors
/// Returns `DomainError::InvalidTemplate` if the template is blank, absolute
/// (leading separator or drive prefix), or contains a `..` segment.
pub fn expand_template(template: &str, year: i32) -> Result<PathBuf, DomainError> {
    let invalid = || DomainError::InvalidTemplate(template.to_string());

    let trimmed = template.trim();
    if trimmed.is_empty() || trimmed.starts_with(['/', '\\']) || has_drive_prefix(trimmed) {
        return Err(invalid());
    }

    let expanded = trimmed.replace(YEAR_PLACEHOLDER, &year.to_string());
    let mut path = PathBuf::new();
    for segment in expanded.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => return Err(invalid()),
            s => path.push(s),
        }
    }

    if path.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(path)
}

fn has_drive_prefix(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Static lookup table from department to destination subpath.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationMapping {
    entries: BTreeMap<DepartmentName, PathBuf>,
}

impl DestinationMapping {
    /// Builds the mapping from `(department, template)` pairs, expanding
    /// `{year}` with `year`.
    ///
    /// # Errors
    /// Fails on the first invalid template.
    pub fn from_templates<'a, I>(templates: I, year: i32) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a DepartmentName, &'a String)>,
    {
        let entries = templates
            .into_iter()
            .map(|(department, template)| {
                expand_template(template, year).map(|path| (department.clone(), path))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self { entries })
    }

    /// Looks up the relative destination for `department`.
    ///
    /// `None` means the department is unmapped, a configuration error.
    pub fn map(&self, department: &DepartmentName) -> Option<&Path> {
        self.entries.get(department).map(PathBuf::as_path)
    }

    /// Number of mapped departments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no department is mapped
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(department, relative path)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&DepartmentName, &Path)> {
        self.entries.iter().map(|(d, p)| (d, p.as_path()))
    }
}
