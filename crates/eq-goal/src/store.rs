// store.rs - LedgerFile: reads and writes ledger lines on disk.
//
// This is the only place that touches the filesystem for ledger data.
// Reads distinguish a missing file from other I/O failures so callers can
// report "file not found" on its own.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;

/// A ledger file at a fixed path.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every line of the file.
    pub fn read_lines(&self) -> Result<Vec<String>, LedgerError> {
        let content = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LedgerError::FileNotFound {
                    path: self.path.clone(),
                }
            } else {
                LedgerError::io(&self.path, source)
            }
        })?;
        Ok(content.lines().map(str::to_string).collect())
    }

    /// Write the lines, each terminated by `\n`, replacing any existing
    /// file. Parent directories are created as needed.
    pub fn write_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| LedgerError::io(parent, source))?;
            }
        }

        let file =
            fs::File::create(&self.path).map_err(|source| LedgerError::io(&self.path, source))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line.as_ref())
                .map_err(|source| LedgerError::io(&self.path, source))?;
        }
        writer
            .flush()
            .map_err(|source| LedgerError::io(&self.path, source))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read_lines() {
        let dir = tempdir().unwrap();
        let file = LedgerFile::new(dir.path().join("nested").join("goals.txt"));

        file.write_lines(&["10", "Eternal,Pray,morning,5"]).unwrap();
        assert!(file.exists());
        assert_eq!(
            fs::read_to_string(file.path()).unwrap(),
            "10\nEternal,Pray,morning,5\n"
        );
        assert_eq!(file.read_lines().unwrap(), vec!["10", "Eternal,Pray,morning,5"]);
    }

    #[test]
    fn read_missing_file_is_file_not_found() {
        let dir = tempdir().unwrap();
        let file = LedgerFile::new(dir.path().join("absent.txt"));
        assert!(matches!(
            file.read_lines(),
            Err(LedgerError::FileNotFound { .. })
        ));
    }

    #[test]
    fn read_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let file = LedgerFile::new(dir.path());
        assert!(matches!(file.read_lines(), Err(LedgerError::Io { .. })));
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let file = LedgerFile::new(dir.path().join("goals.txt"));
        file.write_lines(&["1", "Eternal,A,a,1", "Eternal,B,b,1"]).unwrap();
        file.write_lines(&["0"]).unwrap();
        assert_eq!(file.read_lines().unwrap(), vec!["0"]);
    }
}
