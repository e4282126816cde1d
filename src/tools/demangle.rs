use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Maps a mangled symbol name to a display string. Only diagnostics go
/// through this; graph construction never sees demangled names.
pub trait Demangler {
    fn demangle(&self, name: &str) -> Result<String>;
}

/// Demangles by invoking a `c++filt`-compatible binary, one name per call.
pub struct CxxFiltDemangler {
    binary: PathBuf,
}

impl CxxFiltDemangler {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("c++filt"),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for CxxFiltDemangler {
    fn default() -> Self {
        Self::new()
    }
}

impl Demangler for CxxFiltDemangler {
    fn demangle(&self, name: &str) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg(name)
            .output()
            .with_context(|| format!("failed to run demangler '{}'", self.binary.display()))?;
        if !output.status.success() {
            bail!(
                "demangler '{}' failed on '{}': {}",
                self.binary.display(),
                name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let demangled = String::from_utf8_lossy(&output.stdout);
        let first_line = demangled.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            bail!(
                "demangler '{}' produced no output for '{}'",
                self.binary.display(),
                name
            );
        }
        Ok(first_line.to_string())
    }
}

/// Passes names through untouched. Used by tests and `--no-demangle`.
pub struct IdentityDemangler;

impl Demangler for IdentityDemangler {
    fn demangle(&self, name: &str) -> Result<String> {
        Ok(name.to_string())
    }
}
