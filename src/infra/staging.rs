use anyhow::Context;
use log::{debug, error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A temporary copy of an explicitly provided file. The copy is what gets
/// read during assembly, and it must be deleted when the session ends even
/// if a directory entry with the same name shadowed it in the file map.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub name: String,
    pub path: PathBuf,
}

/// Copies each provided file into a uniquely named temp file and returns
/// the staged entries keyed by the source's bare filename. Failing to read
/// an explicitly named input is a hard error.
pub fn stage_files(paths: &[PathBuf]) -> anyhow::Result<Vec<StagedFile>> {
    let mut staged = Vec::with_capacity(paths.len());

    for source in paths {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("path has no filename: {}", source.display()))?;

        let bytes = fs::read(source)
            .with_context(|| format!("failed to read input file {}", source.display()))?;

        let mut tmp = tempfile::Builder::new()
            .prefix("filecat-")
            .tempfile()
            .context("failed to create temporary file")?;
        tmp.write_all(&bytes)
            .with_context(|| format!("failed to stage {}", source.display()))?;

        // Detach from the handle so the copy survives until cleanup.
        let path = tmp
            .into_temp_path()
            .keep()
            .context("failed to persist temporary file")?;

        debug!("Staged {} at {}", name, path.display());
        staged.push(StagedFile { name, path });
    }

    info!("Staged {} files", staged.len());
    Ok(staged)
}

/// Deletes every staged copy. A failed deletion is reported and skipped;
/// it never stops cleanup of the remaining files.
pub fn cleanup_staged(staged: &[StagedFile]) {
    for file in staged {
        match fs::remove_file(&file.path) {
            Ok(()) => debug!("Removed temporary file {}", file.path.display()),
            Err(err) => error!(
                "Error cleaning up temporary file {}: {}",
                file.path.display(),
                err
            ),
        }
    }
}

/// True when the path lives under the platform temp directory. Staged
/// copies always do; directory entries never should.
pub fn is_staged_location(path: &Path) -> bool {
    path.starts_with(std::env::temp_dir())
}
