use crate::core::binary::is_binary;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Reads a file for inclusion in the combined output. Never fails: binary
/// files, undecodable content and read errors all come back as placeholder
/// text so assembly can treat every file uniformly.
pub fn extract_file_content(path: &Path) -> String {
    if is_binary(path) {
        debug!("Skipping binary file: {}", path.display());
        return format!("[Skipped binary file: {}]", path.display());
    }

    match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                warn!("File is not valid UTF-8: {}", path.display());
                format!("[Skipped: file {} is not valid UTF-8 text]", path.display())
            }
        },
        Err(err) => {
            warn!("Error reading file {}: {}", path.display(), err);
            format!("[Error reading file {}: {}]", path.display(), err)
        }
    }
}
