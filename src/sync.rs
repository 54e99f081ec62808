use std::fs;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::error::Error;

/// What a single [`sync_file`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The file was copied (fresh, or overwritten because it drifted).
    Copied,
    /// A byte-identical local copy already existed; nothing was written.
    UpToDate,
}

/// Copy `source_path` into `dest_dir` unless a byte-identical copy is
/// already there.
///
/// Staleness is decided by full content comparison, never by timestamps:
/// the source and cache filesystems may disagree on clocks, and a wrong
/// skip is worse than re-reading both files. `dest_dir` is created if
/// missing; concurrent workers racing on the same directory are fine.
pub fn sync_file(source_path: &Path, dest_dir: &Path) -> Result<SyncOutcome, Error> {
    fs::create_dir_all(dest_dir)?;

    let file_name = source_path.file_name().ok_or_else(|| Error::PathMapping {
        path: source_path.to_string_lossy().into_owned(),
    })?;
    let local_file = dest_dir.join(file_name);

    if !local_file.is_file() {
        debug!(source = %source_path.display(), dest = %local_file.display(), "copying new local file");
        copy_with_metadata(source_path, &local_file)?;
        return Ok(SyncOutcome::Copied);
    }

    if files_identical(source_path, &local_file)? {
        debug!(source = %source_path.display(), "local file up to date");
        Ok(SyncOutcome::UpToDate)
    } else {
        debug!(source = %source_path.display(), dest = %local_file.display(), "updating stale local file");
        copy_with_metadata(source_path, &local_file)?;
        Ok(SyncOutcome::Copied)
    }
}

/// Copy contents plus permissions, then carry the source mtime over so the
/// local copy looks like the original to anything inspecting it later.
fn copy_with_metadata(source: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(source, dest)?;
    let modified = fs::metadata(source)?.modified()?;
    let dest_file = fs::File::options().write(true).open(dest)?;
    dest_file.set_times(fs::FileTimes::new().set_modified(modified))?;
    Ok(())
}

fn files_identical(a: &Path, b: &Path) -> io::Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }

    let mut reader_a = BufReader::new(fs::File::open(a)?);
    let mut reader_b = BufReader::new(fs::File::open(b)?);
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let n = reader_a.read(&mut buf_a)?;
        if n == 0 {
            return Ok(true);
        }
        // Lengths match, so b must have these bytes too.
        reader_b.read_exact(&mut buf_b[..n])?;
        if buf_a[..n] != buf_b[..n] {
            return Ok(false);
        }
    }
}
