use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::TimeStorage;
use crate::storage::types::TimeRecord;

/// Newline-delimited text file holding one `TimeRecord` per line.
///
/// Every operation takes `lock` first, so a read-modify-write in `delete`
/// cannot interleave with an `append` from the same process. Other processes
/// writing the same file are not coordinated with.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates a storage handle for `path`. No file is touched until
    /// [`TimeStorage::initialize`] or the first operation.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.lock.lock().map_err(|_| {
            error!("Storage lock for {} is poisoned", self.path.display());
            StorageError::LockPoisoned
        })
    }

    fn io_error(&self, action: &str, e: io::Error) -> StorageError {
        error!("Failed to {} {}: {}", action, self.path.display(), e);
        StorageError::io(&self.path, e)
    }

    /// Directory that receives the temporary file during a rewrite.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn load(&self) -> Result<Vec<TimeRecord>, StorageError> {
        let mut content = String::new();
        match File::open(&self.path) {
            Ok(mut f) => {
                f.read_to_string(&mut content)
                    .map_err(|e| self.io_error("read", e))?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist, reading as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error("open", e)),
        }
        // '\r' alone also ends a line, as in files saved by classic Mac editors.
        Ok(content
            .split(['\n', '\r'])
            .filter_map(TimeRecord::from_line)
            .collect())
    }

    /// Replaces the file with `records` by writing a sibling temp file and
    /// renaming it over the original. The original's permissions carry over.
    fn rewrite(&self, records: &[TimeRecord]) -> Result<(), StorageError> {
        let tmp = NamedTempFile::new_in(self.parent_dir())
            .map_err(|e| self.io_error("create temporary file for", e))?;
        {
            let mut w = BufWriter::new(tmp.as_file());
            for record in records {
                writeln!(w, "{}", record).map_err(|e| self.io_error("write", e))?;
            }
            w.flush().map_err(|e| self.io_error("flush", e))?;
        }
        match fs::metadata(&self.path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.io_error("copy permissions of", e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error("stat", e)),
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| self.io_error("sync", e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error("replace", e.error))?;
        Ok(())
    }
}

impl TimeStorage for FileStorage {
    fn initialize(&self) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create directory {}: {}", parent.display(), e);
                StorageError::io(parent, e)
            })?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("create", e))?;
        info!("FileStorage initialized at {}", self.path.display());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<TimeRecord>, StorageError> {
        let _guard = self.guard()?;
        let records = self.load()?;
        debug!("Loaded {} time(s) from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn append(&self, record: &TimeRecord) -> Result<(), StorageError> {
        let _guard = self.guard()?;
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error("open for append", e))?;
        writeln!(f, "{}", record).map_err(|e| self.io_error("append to", e))?;
        debug!("Appended {:?} to {}", record.as_str(), self.path.display());
        Ok(())
    }

    fn delete(&self, record: &TimeRecord) -> Result<bool, StorageError> {
        let _guard = self.guard()?;
        let mut records = self.load()?;
        let Some(index) = records.iter().position(|r| r == record) else {
            debug!("{:?} not present in {}", record.as_str(), self.path.display());
            return Ok(false);
        };
        records.remove(index);
        self.rewrite(&records)?;
        info!(
            "Deleted {:?} from {}, {} time(s) remain",
            record.as_str(),
            self.path.display(),
            records.len()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(s: &str) -> TimeRecord {
        TimeRecord::parse(s).unwrap()
    }

    fn strings(records: &[TimeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.as_str()).collect()
    }

    fn storage_in(dir: &TempDir) -> FileStorage {
        FileStorage::new(dir.path().join("times.txt"))
    }

    #[test]
    fn test_initialize_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        storage.initialize().unwrap();
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "");
    }

    #[test]
    fn test_initialize_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\nb\n").unwrap();
        storage.initialize().unwrap();
        storage.initialize().unwrap();
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_initialize_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/data/times.txt"));
        storage.initialize().unwrap();
        assert!(storage.path().exists());
    }

    #[test]
    fn test_read_all_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.read_all().unwrap().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_append_then_read_all() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        storage.initialize().unwrap();
        storage.append(&record("12.34")).unwrap();
        let all = storage.read_all().unwrap();
        assert_eq!(all.last().map(|r| r.as_str()), Some("12.34"));
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "12.34\n");
    }

    #[test]
    fn test_append_preserves_order() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        storage.initialize().unwrap();
        for s in ["a", "b", "c"] {
            storage.append(&record(s)).unwrap();
        }
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_read_all_skips_blank_lines_and_trims() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\n\n b \n").unwrap();
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_read_all_handles_crlf_and_missing_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\r\nb").unwrap();
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_read_all_splits_on_lone_carriage_return() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\rb\n").unwrap();
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_found() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\nb\nc\n").unwrap();
        assert!(storage.delete(&record("b")).unwrap());
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "c"]);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "a\nc\n");
    }

    #[test]
    fn test_delete_not_found_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\n\nc\n").unwrap();
        assert!(!storage.delete(&record("b")).unwrap());
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "a\n\nc\n");
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["a", "c"]);
    }

    #[test]
    fn test_delete_removes_single_duplicate() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        storage.initialize().unwrap();
        storage.append(&record("x")).unwrap();
        storage.append(&record("x")).unwrap();
        assert!(storage.delete(&record("x")).unwrap());
        assert_eq!(strings(&storage.read_all().unwrap()), vec!["x"]);
    }

    #[test]
    fn test_delete_rewrite_drops_blank_lines() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "\n a\n\nb\n  \nc").unwrap();
        assert!(storage.delete(&record("b")).unwrap());
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "a\nc\n");
    }

    #[test]
    fn test_delete_last_record_leaves_empty_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "only\n").unwrap();
        assert!(storage.delete(&record("only")).unwrap());
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_delete_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "a\nb\n").unwrap();
        fs::set_permissions(storage.path(), fs::Permissions::from_mode(0o644)).unwrap();

        assert!(storage.delete(&record("a")).unwrap());
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "b\n");
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        use std::sync::Arc;
        use std::thread;

        let dir = TempDir::new().unwrap();
        let storage = Arc::new(storage_in(&dir));
        storage.initialize().unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let storage = storage.clone();
                thread::spawn(move || {
                    for j in 0..10 {
                        storage.append(&record(&format!("{}-{}", i, j))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(storage.read_all().unwrap().len(), 80);
    }
}
