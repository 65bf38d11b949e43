//! Data path construction helpers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to a basis path while a file is being written.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Joins `prefix` and `name` with `separator`.
///
/// The separator is left out when `name` is empty.
#[must_use]
pub fn prepend_path(prefix: &str, name: &str, separator: &str) -> String {
    let separator = if name.is_empty() { "" } else { separator };
    let mut out = String::with_capacity(prefix.len() + separator.len() + name.len());
    out.push_str(prefix);
    out.push_str(separator);
    out.push_str(name);
    out
}

/// Joins `prefix` and `name` with a single `/`.
///
/// Returns `name` unchanged when `prefix` is empty; one leading slash is
/// stripped from `name` so the result does not contain `//`.
#[must_use]
pub fn prepend_slash(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_owned();
    }
    let name = name.strip_prefix('/').unwrap_or(name);
    prepend_path(prefix, name, "/")
}

/// Path of the temporary file written next to `basis`.
#[must_use]
pub fn temp_path(basis: &Path) -> PathBuf {
    let mut name = OsString::with_capacity(basis.as_os_str().len() + TEMP_SUFFIX.len());
    name.push(basis.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}
