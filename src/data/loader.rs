// ============================================================
// Layer 4 — Archive Loader
// ============================================================
// Opens a zip archive, finds the first CSV entry that is not
// platform metadata, extracts it into the scratch directory and
// parses it with a best-effort delimiter search.
//
// Delimiters are tried in order: ';' then ',' then '\t'.
// The first one that parses cleanly and yields more than one
// column wins.
//
// Through `TableSource::load`, a failure to read the archive,
// find a CSV entry or parse it is logged and reported as `None`.

use anyhow::{anyhow, bail, Context, Result};
use std::{
    fs::{self, File},
    io::{self, BufReader, Read, Seek},
    path::{Path, PathBuf},
};
use zip::ZipArchive;

use crate::domain::table::RawTable;
use crate::domain::traits::TableSource;

/// Delimiters tried, in order, when parsing the extracted file
pub const DELIMITERS: [u8; 3] = [b';', b',', b'\t'];

/// Path components that mark platform metadata inside archives
const METADATA_DIRS: [&str; 1] = ["__MACOSX"];

/// Loads the first CSV table out of a zip archive.
/// Implements the TableSource trait from Layer 3.
pub struct ArchiveLoader {
    archive: PathBuf,
}

impl ArchiveLoader {
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self { archive: archive.into() }
    }

    /// Fallible body of `load`: extract → parse.
    pub fn try_load(&self, scratch: &Path) -> Result<RawTable> {
        let file = File::open(&self.archive)
            .with_context(|| format!("Cannot open archive '{}'", self.archive.display()))?;
        let mut archive = ZipArchive::new(BufReader::new(file))
            .with_context(|| format!("'{}' is not a readable zip archive", self.archive.display()))?;

        let index = find_data_entry(&mut archive)?
            .ok_or_else(|| anyhow!("no CSV file found in '{}'", self.archive.display()))?;

        let extracted = extract_entry(&mut archive, index, scratch)?;
        tracing::info!("Extracted '{}'", extracted.display());

        parse_with_fallback(&extracted)
    }
}

impl TableSource for ArchiveLoader {
    fn load(&self, scratch: &Path) -> Option<RawTable> {
        match self.try_load(scratch) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::error!("Error loading data from '{}': {e:#}", self.archive.display());
                None
            }
        }
    }
}

/// True if any component of an archive path is platform metadata
/// (`__MACOSX/…`, AppleDouble `._name`, `.DS_Store`).
fn is_metadata_path(name: &str) -> bool {
    name.split('/').any(|part| {
        METADATA_DIRS.contains(&part) || part.starts_with("._") || part == ".DS_Store"
    })
}

fn is_tabular(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".csv")
}

/// Index of the first qualifying CSV entry, in archive order.
fn find_data_entry<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Option<usize>> {
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .with_context(|| format!("Cannot read archive entry #{index}"))?;
        let name = entry.name().to_string();

        if entry.is_dir() || is_metadata_path(&name) {
            tracing::debug!("Skipping archive entry '{name}'");
            continue;
        }
        if is_tabular(&name) {
            tracing::info!("Found data file '{name}' in archive");
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Copy one entry into `scratch` under its bare file name.
fn extract_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index:   usize,
    scratch: &Path,
) -> Result<PathBuf> {
    let mut entry = archive.by_index(index)?;

    let file_name = entry
        .enclosed_name()
        .and_then(|p| p.file_name().map(|n| n.to_os_string()))
        .ok_or_else(|| anyhow!("archive entry '{}' has an unsafe path", entry.name()))?;

    fs::create_dir_all(scratch)
        .with_context(|| format!("Cannot create scratch directory '{}'", scratch.display()))?;

    let dest = scratch.join(file_name);
    let mut out = File::create(&dest)
        .with_context(|| format!("Cannot create '{}'", dest.display()))?;
    io::copy(&mut entry, &mut out)
        .with_context(|| format!("Cannot extract '{}'", entry.name()))?;

    Ok(dest)
}

/// Try each delimiter in turn; accept the first that yields > 1 column.
pub fn parse_with_fallback(path: &Path) -> Result<RawTable> {
    for &delimiter in &DELIMITERS {
        match parse_delimited(path, delimiter) {
            Ok(table) if table.n_cols() > 1 => {
                tracing::info!(
                    "Parsed {} rows x {} columns with delimiter {:?}",
                    table.n_rows(),
                    table.n_cols(),
                    char::from(delimiter),
                );
                return Ok(table);
            }
            Ok(_) => {
                tracing::debug!("Delimiter {:?} produced a single column", char::from(delimiter));
            }
            Err(e) => {
                tracing::debug!("Delimiter {:?} failed: {e:#}", char::from(delimiter));
            }
        }
    }
    bail!("no delimiter in ';' ',' '\\t' split '{}' into more than one column", path.display())
}

/// Parse a delimited file with a header row.
/// Rows may be ragged; missing trailing fields become nulls.
fn parse_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::from_records(headers, records))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_zip;
    use tempfile::tempdir;

    #[test]
    fn test_loads_semicolon_csv() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("bank.zip");
        write_zip(&archive, &[("bank.csv", "\"age\";\"job\";\"y\"\n30;\"admin.\";\"no\"\n41;\"services\";\"yes\"\n")]);

        let scratch = dir.path().join("scratch");
        let table   = ArchiveLoader::new(&archive).load(&scratch).unwrap();

        assert_eq!(table.column_names(), vec!["age", "job", "y"]);
        assert_eq!(table.n_rows(), 2);
        assert!(scratch.join("bank.csv").exists());
    }

    #[test]
    fn test_short_row_is_padded_with_null() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("bank.zip");
        write_zip(&archive, &[("bank.csv", "age;job;y\n30;admin.;no\n41;services\n50;admin.;yes\n")]);

        let table = ArchiveLoader::new(&archive).try_load(&dir.path().join("s")).unwrap();

        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.n_cols(), 3);
        assert_eq!(table.null_count(), 1);

        let y = table.column("y").unwrap();
        assert_eq!(y.cells[1], None);
        assert_eq!(y.cells[2].as_deref(), Some("yes"));
    }

    #[test]
    fn test_falls_back_to_comma() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("data.csv", "a,b\n1,2\n3,4\n")]);

        let table = ArchiveLoader::new(&archive).load(&dir.path().join("s")).unwrap();
        assert_eq!(table.n_cols(), 2);
    }

    #[test]
    fn test_falls_back_to_tab() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("data.csv", "a\tb\tc\n1\t2\t3\n")]);

        let table = ArchiveLoader::new(&archive).load(&dir.path().join("s")).unwrap();
        assert_eq!(table.n_cols(), 3);
    }

    #[test]
    fn test_skips_metadata_entries() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(
            &archive,
            &[
                ("__MACOSX/._bank.csv", "junk"),
                ("folder/._bank.csv", "junk"),
                ("readme.txt", "hello"),
                ("folder/bank.csv", "x;y\n1;yes\n"),
            ],
        );

        let table = ArchiveLoader::new(&archive).load(&dir.path().join("s")).unwrap();
        assert_eq!(table.column_names(), vec!["x", "y"]);
    }

    #[test]
    fn test_no_csv_returns_none() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("readme.txt", "nothing here")]);

        assert!(ArchiveLoader::new(&archive).load(&dir.path().join("s")).is_none());
    }

    #[test]
    fn test_missing_archive_returns_none() {
        let dir = tempdir().unwrap();
        let loader = ArchiveLoader::new(dir.path().join("absent.zip"));
        assert!(loader.load(&dir.path().join("s")).is_none());
    }

    #[test]
    fn test_single_column_returns_none() {
        let dir     = tempdir().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("one.csv", "only\n1\n2\n")]);

        assert!(ArchiveLoader::new(&archive).load(&dir.path().join("s")).is_none());
    }

    #[test]
    fn test_metadata_detection() {
        assert!(is_metadata_path("__MACOSX/bank.csv"));
        assert!(is_metadata_path("data/._bank.csv"));
        assert!(!is_metadata_path("data/bank.csv"));
    }
}
