//! External symbol lister.
//!
//! The default implementation shells out to `nm -A` and parses its line
//! format. Anything that can produce the same record stream can stand in
//! behind [`SymbolLister`]; the rest of the crate never invokes tools
//! directly.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::symbols::SymbolRecord;

/// Yields the raw symbol records for one archive. One call per archive,
/// single-shot: any failure is fatal to the run.
pub trait SymbolLister {
    fn list(&self, archive: &Path) -> Result<Vec<SymbolRecord>>;
}

/// Lists symbols by invoking an `nm`-compatible binary.
pub struct NmLister {
    binary: PathBuf,
}

impl NmLister {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("nm"),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for NmLister {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolLister for NmLister {
    fn list(&self, archive: &Path) -> Result<Vec<SymbolRecord>> {
        let output = Command::new(&self.binary)
            .arg("-A")
            .arg(archive)
            .output()
            .with_context(|| {
                format!(
                    "failed to run symbol lister '{}' on {}",
                    self.binary.display(),
                    archive.display()
                )
            })?;
        if !output.status.success() {
            bail!(
                "symbol lister '{}' failed on {}: {}",
                self.binary.display(),
                archive.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        parse_listing(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses a full `nm -A` listing into symbol records.
///
/// Expected line shape: `<archive>:<object>:<value> <type-code> <name>`,
/// where the value field is empty for undefined symbols. Blank lines are
/// skipped; any other non-matching line, or a type code outside the letter
/// alphabet, is a fatal error carrying the 1-based line number.
pub fn parse_listing(text: &str) -> Result<Vec<SymbolRecord>> {
    let line_re =
        Regex::new(r"^(?P<archive>.+?):(?P<object>[^:]+):(?P<value>[0-9a-fA-F]*)\s+(?P<code>\S)\s+(?P<name>\S+)$")
            .expect("record line pattern");

    let mut records = Vec::new();
    for (position, line) in text.lines().enumerate() {
        let number = position + 1;
        if line.trim().is_empty() {
            continue;
        }
        let captures = match line_re.captures(line) {
            Some(captures) => captures,
            None => bail!("line {}: malformed symbol listing: {}", number, line),
        };
        let code = captures["code"]
            .chars()
            .next()
            .context("empty type code capture")?;
        if !code.is_ascii_alphabetic() {
            bail!(
                "line {}: unrecognized symbol type code '{}': {}",
                number,
                code,
                line
            );
        }
        records.push(SymbolRecord::new(
            basename(&captures["archive"]),
            captures["object"].to_string(),
            code,
            captures["name"].to_string(),
        ));
    }
    Ok(records)
}

/// `nm -A` echoes the archive path as passed; object ids use the basename
/// so the same library referenced via different paths stays one namespace.
fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
