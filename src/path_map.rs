use crate::error::Error;

/// Map an absolute source path to the local cache directory it localises into.
///
/// The caller must have normalized separators to `/` already (Windows
/// back-slashes are converted upstream). Two shapes are accepted:
///
/// - Drive-letter style (`C:/proj/b.mov`): the drive segment with `:`
///   replaced by `_` becomes the prefix, giving `<cache_root>/C_/proj`.
/// - Slash-rooted (`/mnt/x/a.exr`, `//server/share/a.exr`): one `_` per
///   leading slash followed by the root segment becomes the prefix, giving
///   `<cache_root>/_mnt/x` and `<cache_root>/__server/share`.
///
/// Distinct source volumes therefore land in disjoint subtrees under the one
/// cache root, including files sitting directly under a volume root
/// (`/a.ext` → `<cache_root>/_`, `//a.ext` → `<cache_root>/__`). The result
/// is the *directory*; the file's basename is appended by the caller when
/// copying. Paths matching neither shape (relative paths, all-slash paths,
/// a bare drive with no file) are rejected with [`Error::PathMapping`].
pub fn map_to_local_directory(source_path: &str, cache_root: &str) -> Result<String, Error> {
    let parts: Vec<&str> = source_path.split('/').collect();

    let (prefix, rest) = if !source_path.starts_with('/') {
        let drive = parts[0];
        if !is_drive_segment(drive) || parts.len() < 2 {
            return Err(Error::PathMapping {
                path: source_path.to_string(),
            });
        }
        (drive.replace(':', "_"), &parts[1..])
    } else {
        let slash_count = parts.iter().take_while(|p| p.is_empty()).count();
        let root = match parts.get(slash_count) {
            Some(root) if !root.is_empty() => *root,
            _ => {
                return Err(Error::PathMapping {
                    path: source_path.to_string(),
                })
            }
        };
        if parts.len() == slash_count + 1 {
            // The root segment is itself the file name. The prefix is the
            // underscores alone, so the slash count still separates volumes.
            ("_".repeat(slash_count), &parts[slash_count..])
        } else {
            let mut prefix = "_".repeat(slash_count);
            prefix.push_str(root);
            (prefix, &parts[slash_count + 1..])
        }
    };

    // Reassemble, dropping the final segment: this returns the directory.
    let mut mapped: Vec<&str> = cache_root.split('/').collect();
    mapped.push(prefix.as_str());
    mapped.extend_from_slice(rest);
    mapped.pop();
    Ok(mapped.join("/"))
}

/// Drive-letter shape: ASCII alphanumerics followed by a trailing `:`.
fn is_drive_segment(segment: &str) -> bool {
    match segment.strip_suffix(':') {
        Some(letters) => {
            !letters.is_empty() && letters.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}
