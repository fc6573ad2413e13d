//! Zip a directory tree into a single archive.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::FileOptions;

use crate::error::PublishError;

/// What went into an archive.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub files: usize,
    pub size_bytes: u64,
}

/// Compress everything under `source` into `destination`.
///
/// Entry names are relative to `source` with `/` separators. The archive
/// itself is skipped when it lies inside the tree.
pub fn build_archive(source: &Path, destination: &Path) -> Result<ArchiveSummary, PublishError> {
    let archive_error = |reason: String| PublishError::Archive {
        path: destination.display().to_string(),
        reason,
    };

    if !source.is_dir() {
        return Err(archive_error(format!(
            "source {} is not a directory",
            source.display()
        )));
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(destination)?;
    let skip = destination.canonicalize().ok();

    let mut zip = zip::ZipWriter::new(file);
    let entry_opts = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut files = 0;

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_error(e.to_string()))?;
        let path = entry.path();
        if skip.is_some() && path.canonicalize().ok() == skip {
            continue;
        }

        let relative = match path.strip_prefix(source) {
            Ok(rel) if !rel.as_os_str().is_empty() => entry_name(rel),
            _ => continue,
        };

        if entry.file_type().is_dir() {
            zip.add_directory(relative, entry_opts)
                .map_err(|e| archive_error(e.to_string()))?;
        } else if entry.file_type().is_file() {
            zip.start_file(relative, entry_opts)
                .map_err(|e| archive_error(e.to_string()))?;
            let mut reader = File::open(path)?;
            io::copy(&mut reader, &mut zip)?;
            files += 1;
        } else {
            tracing::debug!(path = %path.display(), "Skipping non-regular entry");
        }
    }

    let mut file = zip.finish().map_err(|e| archive_error(e.to_string()))?;
    file.flush()?;

    let size_bytes = fs::metadata(destination)?.len();
    tracing::info!(
        archive = %destination.display(),
        files,
        size_bytes,
        "Archive built"
    );

    Ok(ArchiveSummary {
        path: destination.to_path_buf(),
        files,
        size_bytes,
    })
}

fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
