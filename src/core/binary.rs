use log::debug;
use std::fs;
use std::io::Read;
use std::path::Path;

const SNIFF_LEN: u64 = 1024;

/// Best-effort binary check: a name-based content-type guess first, then a
/// null-byte sniff of the leading bytes when the name is inconclusive. Any
/// failure to open or read the file classifies it as binary.
pub fn is_binary(path: &Path) -> bool {
    if let Some(mime) = mime_guess::from_path(path).first() {
        let binary = mime.type_() != mime_guess::mime::TEXT;
        debug!(
            "Content-type guess for {}: {} (binary: {})",
            path.display(),
            mime,
            binary
        );
        return binary;
    }

    let mut file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!("Cannot open {} for sniffing: {}", path.display(), err);
            return true;
        }
    };

    let mut prefix = Vec::with_capacity(SNIFF_LEN as usize);
    match file.take(SNIFF_LEN).read_to_end(&mut prefix) {
        Ok(_) => prefix.contains(&0),
        Err(err) => {
            debug!("Cannot read {} for sniffing: {}", path.display(), err);
            true
        }
    }
}
