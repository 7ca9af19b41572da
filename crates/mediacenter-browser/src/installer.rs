use crate::{Error, ProfileDirectory, Result};
use mediacenter_core::{CdmDescriptor, DescriptorStore};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copies a Widevine CDM into the profile and records it in the descriptor
pub struct CdmInstaller<'a> {
    profile: &'a ProfileDirectory,
}

impl<'a> CdmInstaller<'a> {
    pub fn new(profile: &'a ProfileDirectory) -> Self {
        Self { profile }
    }

    /// Install `source` (a CDM directory or the library itself) into the profile.
    ///
    /// The copy is staged next to the final location and only moved into
    /// `widevine-cdm` once it is complete. A previous install is parked in
    /// the staging directory until the descriptor is written, and moved back
    /// if the swap fails, so the descriptor never names a partial copy.
    pub fn install(&self, source: &Path, version: &str) -> Result<CdmDescriptor> {
        if fs::metadata(source).is_err() {
            return Err(Error::SourceNotFound(source.to_path_buf()));
        }

        let source_real = canonical_or_nearest(source);
        if source_real.is_dir() && canonical_or_nearest(self.profile.path()).starts_with(&source_real) {
            return Err(Error::SourceContainsProfile(source.to_path_buf()));
        }

        self.profile.ensure_exists()?;

        let target = self.profile.cdm_install_path();
        tracing::info!(
            "Installing Widevine CDM from {} to {}",
            source.display(),
            target.display()
        );

        let staging = tempfile::Builder::new()
            .prefix(".widevine-cdm-")
            .tempdir_in(self.profile.path())
            .map_err(|e| install_error(self.profile.path(), e))?;
        let staged = staging.path().join("payload");
        let backup = staging.path().join("previous");

        let copied = copy_tree(source, &staged)?;
        tracing::debug!("Staged {} file(s) in {}", copied, staging.path().display());

        if let Err(e) = swap_into_place(&staged, &target, &backup) {
            if backup.exists() {
                let kept = staging.keep();
                tracing::error!(
                    "Previous install could not be restored; it was kept at {}",
                    kept.join("previous").display()
                );
            }
            return Err(e);
        }

        let descriptor = CdmDescriptor::new(target, Some(version.to_string()));
        DescriptorStore::save(self.profile.path(), &descriptor)?;

        // Dropping the staging directory discards the previous install
        drop(staging);

        Ok(descriptor)
    }
}

fn install_error(path: &Path, source: io::Error) -> Error {
    Error::Install {
        path: path.to_path_buf(),
        source,
    }
}

/// Canonical form of `path`, or of its nearest existing ancestor with the rest appended
fn canonical_or_nearest(path: &Path) -> PathBuf {
    path.ancestors()
        .find_map(|ancestor| {
            let canonical = fs::canonicalize(ancestor).ok()?;
            let rest = path.strip_prefix(ancestor).unwrap_or(Path::new(""));
            Some(canonical.join(rest))
        })
        .unwrap_or_else(|| path.to_path_buf())
}

/// Move `staged` to `target`, parking any previous install at `backup`.
///
/// If `staged` cannot be moved into place the previous install is moved
/// back, leaving `target` as it was before the call.
fn swap_into_place(staged: &Path, target: &Path, backup: &Path) -> Result<()> {
    let had_previous = match fs::symlink_metadata(target) {
        Ok(_) => {
            tracing::debug!("Parking previous install at {}", backup.display());
            fs::rename(target, backup).map_err(|e| install_error(target, e))?;
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(install_error(target, e)),
    };

    if let Err(e) = fs::rename(staged, target) {
        if had_previous {
            if let Err(restore) = fs::rename(backup, target) {
                tracing::error!(
                    "Failed to restore previous install from {}: {}",
                    backup.display(),
                    restore
                );
            }
        }
        return Err(install_error(target, e));
    }

    Ok(())
}

/// Copy a file or directory tree, returning the number of files copied.
///
/// Links in the source are followed and copied by content. A link cycle
/// is reported as an error.
fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let metadata = fs::metadata(source).map_err(|e| install_error(source, e))?;

    if metadata.is_file() {
        fs::copy(source, dest).map_err(|e| install_error(source, e))?;
        return Ok(1);
    }

    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            install_error(&path, io::Error::from(e))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| install_error(entry.path(), io::Error::other(e)))?;
        let dest_path = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path).map_err(|e| install_error(&dest_path, e))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &dest_path).map_err(|e| install_error(entry.path(), e))?;
            copied += 1;
        } else {
            tracing::warn!("Skipping special file {}", entry.path().display());
        }
    }

    Ok(copied)
}
