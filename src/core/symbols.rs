use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::tools::Demangler;

/// Identifies one object file across the whole archive set.
///
/// The archive component is the basename of the input archive, so objects
/// with the same member name in different archives stay distinct. Two
/// same-named members inside a single archive fold into one id; `nm` output
/// carries nothing that could tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    pub archive: String,
    pub object: String,
}

impl ObjectId {
    pub fn new(archive: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            object: object.into(),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.archive, self.object)
    }
}

/// One raw symbol-table line, already split into fields by the lister.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub archive: String,
    pub object: String,
    pub type_code: char,
    pub name: String,
}

impl SymbolRecord {
    pub fn new(
        archive: impl Into<String>,
        object: impl Into<String>,
        type_code: char,
        name: impl Into<String>,
    ) -> Self {
        Self {
            archive: archive.into(),
            object: object.into(),
            type_code,
            name: name.into(),
        }
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::new(self.archive.clone(), self.object.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    /// An undefined reference the object needs satisfied at link time.
    Undefined,
    /// A weak definition; never a graph-visible provider.
    Weak,
    /// A regular definition.
    Defined,
}

impl SymbolKind {
    /// Classifies an nm-style one-letter type code. Any ASCII letter is part
    /// of the recognized alphabet; anything else means the listing cannot be
    /// trusted and the whole run must stop.
    pub fn from_code(code: char) -> Result<Self> {
        if !code.is_ascii_alphabetic() {
            bail!("unrecognized symbol type code '{}'", code);
        }
        match code.to_ascii_lowercase() {
            'u' => Ok(SymbolKind::Undefined),
            'v' | 'w' => Ok(SymbolKind::Weak),
            _ => Ok(SymbolKind::Defined),
        }
    }
}

/// What one object file needs from and offers to the rest of the archive set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Symbol names this object references but does not define.
    pub needs: BTreeSet<String>,
    /// Symbol names this object defines (non-weak only).
    pub provides: BTreeSet<String>,
}

/// Non-fatal events observed while building the symbol table. Kept as data
/// so the caller decides how to render them (the CLI demangles the names
/// first and prints to stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A symbol defined by more than one object; the first-seen provider
    /// stays in the index.
    DuplicateSymbol {
        symbol: String,
        kept: ObjectId,
        discarded: ObjectId,
        type_code: char,
    },
    /// A weak symbol; excluded from the graph entirely.
    WeakSymbol {
        symbol: String,
        object: ObjectId,
        type_code: char,
    },
}

impl Diagnostic {
    /// Renders the diagnostic for human eyes, running symbol names through
    /// the given demangler. Demangler failure is propagated; there is no
    /// fallback text.
    pub fn message(&self, demangler: &dyn Demangler) -> Result<String> {
        match self {
            Diagnostic::DuplicateSymbol {
                symbol,
                kept,
                discarded,
                type_code,
            } => {
                let pretty = demangler.demangle(symbol)?;
                Ok(format!(
                    "duplicate symbol '{}' (type {}): defined in {} and {}; keeping {}",
                    pretty, type_code, kept, discarded, kept
                ))
            }
            Diagnostic::WeakSymbol {
                symbol,
                object,
                type_code,
            } => {
                let pretty = demangler.demangle(symbol)?;
                Ok(format!(
                    "weak symbol '{}' (type {}) in {}: ignored for dependency analysis",
                    pretty, type_code, object
                ))
            }
        }
    }
}

/// Combined symbol data for one or more archives: per-object needs/provides
/// plus the global symbol-to-provider index.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Every known object file, keyed for deterministic enumeration.
    pub objects: BTreeMap<ObjectId, ObjectRecord>,
    /// Symbol name to its single providing object. First definition wins.
    pub index: HashMap<String, ObjectId>,
    /// Archive basenames in input order.
    pub archives: Vec<String>,
    /// Duplicate/weak events in listing order.
    pub diagnostics: Vec<Diagnostic>,
}

impl SymbolTable {
    /// Looks up the providing object for a symbol name.
    pub fn provider(&self, symbol: &str) -> Option<&ObjectId> {
        self.index.get(symbol)
    }

    /// Merges per-archive tables into one. Archives are assumed to carry
    /// disjoint object and symbol namespaces; any overlap is fatal rather
    /// than silently merged.
    pub fn merge(tables: Vec<SymbolTable>) -> Result<SymbolTable> {
        let mut merged = SymbolTable::default();
        for table in tables {
            for (id, record) in table.objects {
                if merged.objects.contains_key(&id) {
                    bail!(
                        "duplicate object file {} appears in more than one archive",
                        id
                    );
                }
                merged.objects.insert(id, record);
            }
            for (symbol, provider) in table.index {
                if let Some(previous) = merged.index.get(&symbol) {
                    bail!(
                        "symbol '{}' defined in multiple archives: {} and {}",
                        symbol,
                        previous,
                        provider
                    );
                }
                merged.index.insert(symbol, provider);
            }
            merged.archives.extend(table.archives);
            merged.diagnostics.extend(table.diagnostics);
        }
        Ok(merged)
    }
}

/// Accumulates raw symbol records into a [`SymbolTable`].
///
/// One builder per archive; cross-archive constraints are enforced by
/// [`SymbolTable::merge`], not here.
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    objects: BTreeMap<ObjectId, ObjectRecord>,
    index: HashMap<String, ObjectId>,
    archives: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one symbol record. The object is registered as a vertex even
    /// when the record contributes nothing to needs or provides.
    pub fn add_record(&mut self, record: &SymbolRecord) -> Result<()> {
        let kind = SymbolKind::from_code(record.type_code)?;
        let id = record.object_id();

        if !self.archives.contains(&record.archive) {
            self.archives.push(record.archive.clone());
        }
        let entry = self.objects.entry(id.clone()).or_default();

        match kind {
            SymbolKind::Undefined => {
                entry.needs.insert(record.name.clone());
            }
            SymbolKind::Weak => {
                self.diagnostics.push(Diagnostic::WeakSymbol {
                    symbol: record.name.clone(),
                    object: id,
                    type_code: record.type_code,
                });
            }
            SymbolKind::Defined => {
                entry.provides.insert(record.name.clone());
                match self.index.get(&record.name) {
                    Some(existing) => {
                        self.diagnostics.push(Diagnostic::DuplicateSymbol {
                            symbol: record.name.clone(),
                            kept: existing.clone(),
                            discarded: id,
                            type_code: record.type_code,
                        });
                    }
                    None => {
                        self.index.insert(record.name.clone(), id);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn add_records(&mut self, records: &[SymbolRecord]) -> Result<()> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    pub fn build(self) -> SymbolTable {
        SymbolTable {
            objects: self.objects,
            index: self.index,
            archives: self.archives,
            diagnostics: self.diagnostics,
        }
    }
}
