use std::fs;
use std::path::Path;

/// Reads a file as text, returning an empty string if it cannot be read.
///
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn read_file_safe(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            ::log::warn!("Failed to read {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Convert a file path under `root` into a site path such as `/catalog/a.htm`.
///
/// Paths outside `root` are kept whole. Backslashes become forward slashes.
pub fn site_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined.replace('\\', "/").trim_start_matches('/'))
}
