//! Project packaging
//!
//! Copies a filtered snapshot of the project into a staging directory, zips
//! the staging tree under a single `project/` root, then removes the staging
//! copy. Only top-level entry names are filtered.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::CONFIG_FILE_NAME;
use crate::error::PackageError;

/// Staging directory created inside the project root while packaging
pub const STAGING_DIR_NAME: &str = "temp_project_folder";

/// Default archive file name, placed in the project root
pub const ARCHIVE_FILE_NAME: &str = "project.zip";

/// Top-level directory name of every entry inside the archive
pub const ARCHIVE_ROOT: &str = "project";

pub const DEPENDENCY_DIR_NAME: &str = "node_modules";
pub const VCS_DIR_NAME: &str = ".git";

/// Top-level entries never copied into the archive
pub const EXCLUDED_ENTRIES: [&str; 4] = [
    DEPENDENCY_DIR_NAME,
    VCS_DIR_NAME,
    CONFIG_FILE_NAME,
    STAGING_DIR_NAME,
];

/// Maximum deflate level
const COMPRESSION_LEVEL: i64 = 9;

type Result<T> = std::result::Result<T, PackageError>;

/// What ended up in the archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageSummary {
    /// Regular files added
    pub files: usize,
    /// Directories added (excluding the archive root)
    pub directories: usize,
    /// Size of the finished archive on disk
    pub bytes: u64,
}

/// Whether a top-level entry name is in the exclusion set
pub fn is_excluded(name: &OsStr) -> bool {
    EXCLUDED_ENTRIES.iter().any(|excluded| name == OsStr::new(excluded))
}

/// Package `source` into a zip archive at `output`.
///
/// The staging directory is removed whether or not packaging succeeds. A
/// partially written archive is removed on failure.
pub fn package_project(source: &Path, output: &Path) -> Result<PackageSummary> {
    if !source.is_dir() {
        return Err(PackageError::SourceNotDirectory(source.to_path_buf()));
    }

    let result = StagingDir::create(source.join(STAGING_DIR_NAME)).and_then(|staging| {
        let (files, directories) = stage_entries(source, output, staging.path())?;
        debug!(
            "Staged {} files and {} directories from {}",
            files,
            directories,
            source.display()
        );
        let bytes = write_archive(staging.path(), output)?;
        Ok(PackageSummary {
            files,
            directories,
            bytes,
        })
    });

    if result.is_err() {
        remove_partial_archive(output);
    }

    result
}

/// Copy every non-excluded top-level entry of `source` into `staging`
fn stage_entries(source: &Path, output: &Path, staging: &Path) -> Result<(usize, usize)> {
    let mut counts = (0, 0);

    let entries = fs::read_dir(source).map_err(|e| PackageError::io(source, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PackageError::io(source, e))?;
        let name = entry.file_name();
        let path = entry.path();

        if is_excluded(&name) || is_archive(&path, output) {
            debug!("Skipping {}", path.display());
            continue;
        }

        let file_type = entry.file_type().map_err(|e| PackageError::io(&path, e))?;
        let target = staging.join(&name);
        if file_type.is_dir() {
            copy_tree(&path, &target, &mut counts)?;
        } else if file_type.is_symlink() && path.is_dir() {
            debug!("Skipping directory symlink {}", path.display());
        } else {
            fs::copy(&path, &target).map_err(|e| PackageError::io(&path, e))?;
            counts.0 += 1;
        }
    }

    Ok(counts)
}

/// Recursively copy a directory. Nested symlinks are skipped.
fn copy_tree(from: &Path, to: &Path, counts: &mut (usize, usize)) -> Result<()> {
    for item in WalkDir::new(from).follow_links(false) {
        let item = item.map_err(|e| walk_error(from, e))?;
        let Ok(relative) = item.path().strip_prefix(from) else {
            continue;
        };
        let dest = to.join(relative);
        let file_type = item.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dest).map_err(|e| PackageError::io(&dest, e))?;
            counts.1 += 1;
        } else if file_type.is_file() {
            fs::copy(item.path(), &dest).map_err(|e| PackageError::io(item.path(), e))?;
            counts.0 += 1;
        } else {
            debug!("Skipping symlink {}", item.path().display());
        }
    }

    Ok(())
}

/// Zip the staging tree under [`ARCHIVE_ROOT`], returning the archive size
fn write_archive(staging: &Path, output: &Path) -> Result<u64> {
    let file = File::create(output).map_err(|e| PackageError::io(output, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL));

    zip.add_directory(format!("{}/", ARCHIVE_ROOT), options)?;

    for item in WalkDir::new(staging).min_depth(1).sort_by_file_name() {
        let item = item.map_err(|e| walk_error(staging, e))?;
        let Ok(relative) = item.path().strip_prefix(staging) else {
            continue;
        };
        let name = archive_entry_name(relative);

        if item.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), options)?;
        } else if item.file_type().is_file() {
            zip.start_file(name, options)?;
            let mut input = File::open(item.path()).map_err(|e| PackageError::io(item.path(), e))?;
            io::copy(&mut input, &mut zip).map_err(|e| PackageError::io(item.path(), e))?;
        }
    }

    let file = zip.finish()?;
    let bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
    debug!("Wrote archive {} ({} bytes)", output.display(), bytes);

    Ok(bytes)
}

/// `project/<relative path>` with `/` separators on every platform
fn archive_entry_name(relative: &Path) -> String {
    let mut name = String::from(ARCHIVE_ROOT);
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

/// Whether `path` is the archive being written
fn is_archive(path: &Path, output: &Path) -> bool {
    if path.file_name() != output.file_name() {
        return false;
    }
    match (path.parent(), output.parent()) {
        (Some(a), Some(b)) => same_dir(a, b),
        _ => false,
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    let b = if b.as_os_str().is_empty() { Path::new(".") } else { b };
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> PackageError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    PackageError::io(path, err.into())
}

fn remove_partial_archive(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => debug!("Removed partial archive {}", output.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial archive {}: {}", output.display(), e),
    }
}

/// Staging directory removed on drop
struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Create a fresh staging directory, clearing leftovers from an earlier run
    fn create(path: PathBuf) -> Result<Self> {
        if path.exists() {
            fs::remove_dir_all(&path).map_err(|e| PackageError::io(&path, e))?;
        }
        fs::create_dir_all(&path).map_err(|e| PackageError::io(&path, e))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staging directory {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
