//! Filesystem utilities for atomic writes.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to `destination` through a sibling temp file and rename.
///
/// Parent directories are created as needed. On platforms where `fs::rename`
/// fails if the destination exists (notably Windows), the destination is
/// removed and the rename retried; any other rename failure is returned
/// as-is. Each call uses its own temp file, so concurrent writers to the
/// same destination never clobber each other's temp file. The temp file is
/// removed on failure.
pub fn write_atomic(destination: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = destination.as_os_str().to_owned();
    temp_name.push(format!(
        ".tmp{}.{}",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let temp_path = Path::new(&temp_name);

    if let Err(err) = fs::write(temp_path, contents) {
        let _ = fs::remove_file(temp_path);
        return Err(err);
    }

    if let Err(initial_err) = fs::rename(temp_path, destination) {
        if !destination_exists_error(&initial_err) {
            let _ = fs::remove_file(temp_path);
            return Err(initial_err);
        }
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

fn destination_exists_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
    )
}
