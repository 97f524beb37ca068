use crate::error::{map_csv_error, CorpusError};
use codemint_core::{
    BatchId, BatchStore, Code, CodeRegistry, ExistingCodes, Prefix, StorageError, ALPHABET,
    CODE_LENGTH,
};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSION: &str = "csv";
const HEADER: &str = "code";

/// A directory of CSV files, one code per row in the first column.
///
/// As a [`CodeRegistry`] it scans every `*.csv` file whose name starts with
/// the requested prefix (case-insensitive). As a [`BatchStore`] it writes
/// each batch to a new file with a `code` header row.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the directory currently exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn is_candidate(path: &Path, prefix: &Prefix) -> bool {
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));
        let matches_prefix = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| prefix.is_prefix_of(name));

        is_csv && matches_prefix && path.is_file()
    }

    /// Reads the first field of every record into `codes`.
    ///
    /// A leading row that does not look like a code is taken as a header and
    /// skipped. Codes read before a malformed record stay in `codes`.
    fn read_codes(path: &Path, codes: &mut ExistingCodes) -> Result<usize, CorpusError> {
        let file = File::open(path).map_err(|source| CorpusError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut added = 0;
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|source| CorpusError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
            let Some(first) = record.get(0) else {
                continue;
            };
            if index == 0 && !is_code_shaped(first) {
                debug!(path = %path.display(), header = first, "skipping header row");
                continue;
            }
            if first.is_empty() {
                continue;
            }
            if codes.insert(first) {
                added += 1;
            }
        }

        Ok(added)
    }
}

/// Exactly [`CODE_LENGTH`] code symbols. Only the first row of a file is
/// held to this; later rows are taken as stored.
fn is_code_shaped(field: &str) -> bool {
    field.len() == CODE_LENGTH && field.bytes().all(|b| ALPHABET.contains(&b))
}

impl CodeRegistry for CsvDirectory {
    fn load(&self, prefix: &Prefix) -> ExistingCodes {
        let mut codes = ExistingCodes::new();

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    corpus = %self.root.display(),
                    error = %err,
                    "corpus directory not readable; assuming no existing codes"
                );
                return codes;
            }
        };

        let mut scanned = 0;
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!(corpus = %self.root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !Self::is_candidate(&path, prefix) {
                continue;
            }

            scanned += 1;
            match Self::read_codes(&path, &mut codes) {
                Ok(added) => debug!(path = %path.display(), added, "loaded existing codes"),
                Err(err) => warn!(error = %err, "skipping corpus file"),
            }
        }

        debug!(
            corpus = %self.root.display(),
            prefix = %prefix,
            files = scanned,
            codes = codes.len(),
            "scanned corpus"
        );

        codes
    }
}

impl BatchStore for CsvDirectory {
    fn extension(&self) -> &str {
        EXTENSION
    }

    fn contains(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.root.join(name).try_exists()?)
    }

    fn persist(&self, name: &str, codes: &[Code]) -> Result<BatchId, StorageError> {
        fs::create_dir_all(&self.root)?;
        let path = self.root.join(name);

        // Never clobber an earlier batch, even if one appeared after the name
        // was resolved.
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record([HEADER]).map_err(map_csv_error)?;
        for code in codes {
            writer.write_record([code.as_str()]).map_err(map_csv_error)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), codes = codes.len(), "persisted batch");
        Ok(BatchId::new(name))
    }
}
