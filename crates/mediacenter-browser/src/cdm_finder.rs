use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    // libwidevinecdm.so (Linux), libwidevinecdm.dylib (macOS), widevinecdm.dll (Windows, any case)
    static ref CDM_FILE_NAME: Regex =
        Regex::new(r"(?:libwidevinecdm\.(?:so|dylib)|(?i:widevinecdm\.dll))$").unwrap();
}

/// Check whether a file name looks like a native Widevine CDM library
pub fn is_cdm_file_name(name: &str) -> bool {
    CDM_FILE_NAME.is_match(name)
}

/// Locates the Widevine CDM library inside a file or directory
pub struct CdmFinder;

impl CdmFinder {
    /// Resolve `source` to a concrete CDM library.
    ///
    /// - a missing path yields `None`;
    /// - a regular file is returned as-is, whatever its name;
    /// - a directory is searched depth-first, siblings in file name order,
    ///   and the first regular file with a CDM name wins.
    ///
    /// Symbolic links below `source` are never followed, so link cycles
    /// cannot trap the walk. Subtrees that cannot be read are skipped.
    pub fn locate(source: &Path) -> Option<PathBuf> {
        let metadata = match fs::metadata(source) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!("CDM source {} unavailable: {}", source.display(), e);
                return None;
            }
        };

        if metadata.is_file() {
            return Some(source.to_path_buf());
        }

        if !metadata.is_dir() {
            tracing::debug!("CDM source {} is neither file nor directory", source.display());
            return None;
        }

        let walker = WalkDir::new(source).follow_links(false).sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry while searching for CDM: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if entry.file_name().to_str().is_some_and(is_cdm_file_name) {
                tracing::debug!("Found Widevine CDM at {}", entry.path().display());
                return Some(entry.into_path());
            }
        }

        tracing::debug!("No Widevine CDM below {}", source.display());
        None
    }
}
