use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{PlanteError, Result};

/// Quote a CSV field if it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render report lines as a single-column CSV document.
pub fn to_csv<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&csv_field(line.as_ref()));
        out.push_str("\r\n");
    }
    out
}

/// Permissions for the exported file: those of the file being replaced, or
/// 0644 for a new one. Temporary files are created owner-only.
fn destination_permissions(path: &Path) -> Result<Option<Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(e) => Err(PlanteError::Export(format!("{}: {e}", path.display()))),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Write report lines to `path` as single-column CSV.
///
/// Data goes to a temporary file next to the destination which is then
/// renamed over it, so the destination either keeps its old content or
/// holds the complete new file.
pub fn export_csv<S: AsRef<str>>(lines: &[S], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| PlanteError::Export(format!("{}: {e}", dir.display())))?;
    tmp.write_all(to_csv(lines).as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| PlanteError::Export(format!("{}: {e}", path.display())))?;
    if let Some(perms) = destination_permissions(path)? {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| PlanteError::Export(format!("{}: {e}", path.display())))?;
    }
    tmp.persist(path)
        .map_err(|e| PlanteError::Export(format!("{}: {}", path.display(), e.error)))?;

    info!(path = %path.display(), rows = lines.len(), "Report exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_unquoted() {
        assert_eq!(to_csv(&["U1: 2.5 cm²", "U6: 3.0 cm²"]), "U1: 2.5 cm²\r\nU6: 3.0 cm²\r\n");
    }

    #[test]
    fn special_characters_are_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
