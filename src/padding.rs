use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HASH_RUN: Regex = Regex::new(r"#+").unwrap();
    static ref PRINTF_PAD: Regex = Regex::new(r"%0?(\d+)d").unwrap();
}

/// Convert hash padding to C-style padding:
/// `path.####.exr` → `path.%04d.exr`, `path.######.exr` → `path.%06d.exr`.
///
/// Paths without hashes come back unchanged. Caller-side helper: the engine
/// itself only ever sees already-expanded file lists.
pub fn fix_padding(path: &str) -> String {
    match HASH_RUN.find(path) {
        Some(run) => {
            let replacement = format!("%{:02}d", run.len());
            path.replace(run.as_str(), &replacement)
        }
        None => path.to_string(),
    }
}

/// Expand a `%0Nd`-padded pattern over a frame range, skipping paths already
/// claimed in `existing` (a frame shared between two sequences is only
/// localised once). A pattern with no padding token is a still frame or
/// movie file and expands to itself.
pub fn expand_frames(pattern: &str, first: i64, last: i64, existing: &[String]) -> Vec<String> {
    let token = match PRINTF_PAD.captures(pattern) {
        Some(caps) => caps,
        None => {
            if existing.iter().any(|p| p == pattern) {
                return Vec::new();
            }
            return vec![pattern.to_string()];
        }
    };

    let width: usize = token[1].parse().unwrap_or(1);
    let token = &token[0];
    (first..=last)
        .map(|frame| pattern.replacen(token, &format!("{:0width$}", frame), 1))
        .filter(|path| !existing.iter().any(|p| p == path))
        .collect()
}
