use crate::core::extractor::extract_file_content;
use crate::domain::models::AppState;
use log::{debug, info};

const DELIMITER_BAR: &str = "====================";

/// Ordered text blocks, one delimiter line and one content block per
/// included file. Rebuilt from scratch on every generate action.
#[derive(Debug)]
pub struct CombinedOutput {
    pub blocks: Vec<String>,
}

fn delimiter_line(name: &str) -> String {
    format!("{} {} {}\n", DELIMITER_BAR, name, DELIMITER_BAR)
}

/// Extracts every included file in lexicographic name order and moves the
/// session to its final phase.
pub fn generate_output(state: AppState) -> (AppState, CombinedOutput) {
    let mut blocks = Vec::new();

    for entry in state.included() {
        debug!("Adding block for {}", entry.name);
        blocks.push(delimiter_line(&entry.name));
        let content = extract_file_content(&entry.location);
        blocks.push(format!("{}\n\n", content));
    }

    info!("Assembled {} file blocks", blocks.len() / 2);
    (state.generated(), CombinedOutput { blocks })
}

pub fn format_output(output: &CombinedOutput) -> String {
    output.blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FileEntry;
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn state_for(dir: &Path, names: &[&str]) -> AppState {
        let files: BTreeMap<String, FileEntry> = names
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    FileEntry {
                        name: name.to_string(),
                        location: dir.join(name),
                    },
                )
            })
            .collect();
        AppState::with_files(files).editable()
    }

    #[test]
    fn test_blocks_are_labeled_and_ordered() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hello").unwrap();
        let mut bin = fs::File::create(temp_dir.path().join("b.bin")).unwrap();
        bin.write_all(&[0u8, 159, 146, 150]).unwrap();

        // b.bin is inserted first; output order must still be a.txt, b.bin.
        let state = state_for(temp_dir.path(), &["b.bin", "a.txt"]);
        let (_, output) = generate_output(state);

        assert_eq!(output.blocks.len(), 4);
        assert_eq!(
            output.blocks[0],
            "==================== a.txt ====================\n"
        );
        assert_eq!(output.blocks[1], "hello\n\n");
        assert_eq!(
            output.blocks[2],
            "==================== b.bin ====================\n"
        );
        assert!(output.blocks[3].contains("[Skipped binary file:"));
        assert!(output.blocks[3].contains("b.bin"));
    }

    #[test]
    fn test_excluded_file_is_dropped_and_restored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "aaa").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "bbb").unwrap();

        let state = state_for(temp_dir.path(), &["a.txt", "b.txt"]).toggled("b.txt");
        let (_, output) = generate_output(state.clone());

        let formatted = format_output(&output);
        assert!(formatted.contains("aaa"));
        assert!(!formatted.contains("b.txt"));

        // Re-checking brings the block back on the next generation.
        let state = state.toggled("b.txt");
        let (_, output) = generate_output(state);
        let formatted = format_output(&output);
        assert!(formatted.contains("==================== b.txt ===================="));
        assert!(formatted.contains("bbb"));
    }

    #[test]
    fn test_generation_moves_phase_forward() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "aaa").unwrap();

        let state = state_for(temp_dir.path(), &["a.txt"]);
        let (state, _) = generate_output(state);

        assert_eq!(
            state.phase,
            crate::domain::models::SessionPhase::OutputGenerated
        );
    }

    #[test]
    fn test_empty_selection_yields_empty_output() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "aaa").unwrap();

        let state = state_for(temp_dir.path(), &["a.txt"]).exclude_all();
        let (_, output) = generate_output(state);

        assert!(output.blocks.is_empty());
        assert_eq!(format_output(&output), "");
    }
}
