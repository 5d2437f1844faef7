use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Locale file scanner for directories of translation tables.
///
/// The `LocaleScanner` recursively walks a directory to find all YAML locale files
/// (`.yml` or `.yaml`). Hidden files and directories (those starting with `.`) are
/// skipped. Files are returned sorted by path so that later files override earlier
/// ones in a stable order.
///
/// # Example
///
/// ```no_run
/// use apidoc_from_metadata::scanner::LocaleScanner;
/// use std::path::PathBuf;
///
/// let scanner = LocaleScanner::new(PathBuf::from("./config/locales"));
/// let result = scanner.scan().unwrap();
/// println!("Found {} locale files", result.locale_files.len());
/// ```
pub struct LocaleScanner {
    root_path: PathBuf,
}

/// Result of a locale directory scan.
pub struct ScanResult {
    /// Paths to all discovered locale files, sorted
    pub locale_files: Vec<PathBuf>,
    /// Warning messages for entries that could not be read
    pub warnings: Vec<String>,
}

impl LocaleScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Scans the directory tree and collects all locale files.
    ///
    /// Inaccessible entries are logged and recorded as warnings; scanning
    /// continues past them.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut locale_files = Vec::new();
        let mut warnings = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }
                !e.file_name().to_string_lossy().starts_with('.')
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    let is_yaml = matches!(
                        path.extension().and_then(|s| s.to_str()),
                        Some("yml") | Some("yaml")
                    );
                    if path.is_file() && is_yaml {
                        locale_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        locale_files.sort();

        Ok(ScanResult {
            locale_files,
            warnings,
        })
    }
}
