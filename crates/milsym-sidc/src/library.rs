//! Symbol library: name lookup plus a reverse index from masked SIDC to name.
//!
//! Libraries are built once from an ordered list of [`SymbolSource`]s and are
//! read-only afterwards. Each source lists entries as a display name and a
//! `;`-separated tag string whose last tag is the entry's source SIDC
//! pattern.
//!
//! ```yaml
//! symbols:
//!   - name: Infantry
//!     tags: "Friend;Ground;Unit;SFGPUCI-----***"
//! ```

use crate::code::SIDC_LEN;
use milsym_core::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An entry as listed by a library resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    #[serde(default)]
    pub tags: String,
}

impl SymbolEntry {
    pub fn new(name: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: tags.into(),
        }
    }

    /// The source SIDC pattern: the last tag, trimmed, upper-cased, with `*`
    /// read as `-`.
    pub fn source_sidc(&self) -> String {
        let last = self.tags.rsplit(';').next().unwrap_or_default();
        last.trim().to_uppercase().replace('*', "-")
    }
}

/// A renderable symbol handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub sidc: String,
}

/// A provider of library entries.
pub trait SymbolSource {
    /// Human readable identifier for logs.
    fn describe(&self) -> String;

    /// All entries in listing order.
    fn entries(&self) -> Result<Vec<SymbolEntry>>;
}

impl SymbolSource for Vec<SymbolEntry> {
    fn describe(&self) -> String {
        format!("in-memory ({} entries)", self.len())
    }

    fn entries(&self) -> Result<Vec<SymbolEntry>> {
        Ok(self.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    symbols: Vec<SymbolEntry>,
}

/// Library resource stored as a YAML file.
#[derive(Debug, Clone)]
pub struct YamlSymbolSource {
    path: PathBuf,
}

impl YamlSymbolSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SymbolSource for YamlSymbolSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn entries(&self) -> Result<Vec<SymbolEntry>> {
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::load_failed(self.describe(), e.to_string()))?;
        let file: LibraryFile = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::load_failed(self.describe(), e.to_string()))?;
        Ok(file.symbols)
    }
}

/// Process-lifetime symbol lookup tables.
#[derive(Debug, Clone, Default)]
pub struct SymbolLibrary {
    by_name: HashMap<String, Symbol>,
    by_code: HashMap<String, String>,
}

impl SymbolLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from sources, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any source cannot be read.
    pub fn load<S: SymbolSource + ?Sized>(sources: &[&S]) -> Result<Self> {
        let mut library = Self::new();
        for source in sources {
            let entries = source.entries()?;
            let listed = entries.len();
            let added = entries
                .into_iter()
                .filter(|entry| library.ingest(entry))
                .count();
            info!(source = %source.describe(), listed, added, "Loaded symbol library");
        }
        Ok(library)
    }

    /// Builds a library from entries, in order.
    pub fn from_entries<I: IntoIterator<Item = SymbolEntry>>(entries: I) -> Self {
        let mut library = Self::new();
        for entry in entries {
            library.ingest(&entry);
        }
        library
    }

    /// Adds one entry. Returns true if it added a new code.
    ///
    /// First entry wins for both names and codes. Tactical graphic and METOC
    /// entries lose a trailing affiliation suffix from their name.
    pub fn ingest(&mut self, entry: &SymbolEntry) -> bool {
        if self.by_name.contains_key(&entry.name) {
            return false;
        }
        // APP-6 variants are not supported
        if entry.name.contains("APP6") {
            debug!(name = %entry.name, "Skipping APP6 symbol");
            return false;
        }

        let sidc = entry.source_sidc();
        if sidc.is_empty() || self.by_code.contains_key(&sidc) {
            return false;
        }

        let name = if sidc.starts_with('G') || sidc.starts_with('W') {
            strip_affiliation_suffix(&entry.name)
        } else {
            entry.name.clone()
        };

        if sidc.len() != SIDC_LEN {
            debug!(name = %name, sidc = %sidc, "Library entry with non-standard code length");
        }

        self.by_name.entry(name.clone()).or_insert_with(|| Symbol {
            name: name.clone(),
            sidc: sidc.clone(),
        });
        self.by_code.insert(sidc, name);
        true
    }

    /// Symbol with an exact name.
    pub fn by_name(&self, name: &str) -> Option<&Symbol> {
        self.by_name.get(name)
    }

    /// Name registered for an exact masked code.
    pub fn by_masked_code(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    /// Returns true if the reverse index holds `code`.
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Every `(code, name)` pair in the reverse index.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_code.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    /// Number of named symbols.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Drops the last two characters of names ending in F, H, N or U.
fn strip_affiliation_suffix(name: &str) -> String {
    let count = name.chars().count();
    let ends_with_affiliation = name.ends_with(['F', 'H', 'N', 'U']);
    if count > 2 && ends_with_affiliation {
        name.chars().take(count - 2).collect()
    } else {
        name.to_string()
    }
}
