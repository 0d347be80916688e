//! Where table data comes from.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::tables::TableKind;

/// Supplies the text of a table's data file.
pub trait DataSource {
    fn read(&self, table: TableKind) -> Result<String, SourceError>;
}

/// A directory holding `<table>.txt` files.
#[derive(Clone, Debug)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the data file for `table`.
    pub fn path(&self, table: TableKind) -> PathBuf {
        self.root.join(table.file_name())
    }
}

impl DataSource for DataDir {
    fn read(&self, table: TableKind) -> Result<String, SourceError> {
        let path = self.path(table);
        std::fs::read_to_string(&path).map_err(|source| {
            let path = path.display().to_string();
            if source.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound { table, path }
            } else {
                SourceError::Io {
                    table,
                    path,
                    source,
                }
            }
        })
    }
}

/// Table text held in memory, for tests and embedded data.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<TableKind, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: TableKind, text: impl Into<String>) {
        self.files.insert(table, text.into());
    }

    pub fn with(mut self, table: TableKind, text: impl Into<String>) -> Self {
        self.insert(table, text);
        self
    }
}

impl DataSource for MemorySource {
    fn read(&self, table: TableKind) -> Result<String, SourceError> {
        self.files
            .get(&table)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                table,
                path: format!("<memory>/{}", table.file_name()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_distinguishes_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("slay.txt"), "code EVIL_2\n").unwrap();
        std::fs::create_dir(dir.path().join("brand.txt")).unwrap();

        let source = DataDir::new(dir.path());
        assert_eq!(source.read(TableKind::Slay).unwrap(), "code EVIL_2\n");
        assert!(matches!(
            source.read(TableKind::Curse),
            Err(SourceError::NotFound {
                table: TableKind::Curse,
                ..
            })
        ));
        assert!(matches!(
            source.read(TableKind::Brand),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with(TableKind::Object, "name 1 Thing");
        assert_eq!(source.read(TableKind::Object).unwrap(), "name 1 Thing");
        assert!(matches!(
            source.read(TableKind::Artifact),
            Err(SourceError::NotFound { .. })
        ));
    }
}
