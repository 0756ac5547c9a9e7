use crate::core::classifier::should_ignore;
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Walks `root` and returns relative path -> absolute path for every file
/// that survives the built-in ignore rules and the caller's exclusion set.
/// Subdirectories whose bare name matches an ignore pattern are pruned
/// before descent, so their contents never show up at all.
pub fn collect_files(
    root: &Path,
    excluded: &HashSet<String>,
) -> anyhow::Result<BTreeMap<String, PathBuf>> {
    info!("Collecting files under {}", root.display());

    let mut result = BTreeMap::new();

    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            let keep = !should_ignore(&name);
            if !keep {
                debug!("Pruning ignored directory: {}", e.path().display());
            }
            keep
        })
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().into_owned(),
            Err(_) => continue,
        };

        if excluded.contains(&rel_path) || should_ignore(&rel_path) {
            debug!("Skipping excluded file: {}", rel_path);
            continue;
        }

        result.insert(rel_path, entry.path().to_path_buf());
    }

    info!("Collected {} files", result.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collects_relative_to_absolute_mapping() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("src/main.rs"), "fn main() {}");
        touch(&temp_dir.path().join("README.md"), "# readme");

        let files = collect_files(temp_dir.path(), &HashSet::new()).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(
            files.get("src/main.rs").unwrap(),
            &temp_dir.path().join("src/main.rs")
        );
        assert!(files.contains_key("README.md"));
    }

    #[test]
    fn test_ignored_directory_contents_are_excluded() {
        let temp_dir = TempDir::new().unwrap();
        // readme.md alone would be allowed; the node_modules prefix must
        // still keep it out of the result.
        touch(&temp_dir.path().join("node_modules/readme.md"), "x");
        touch(&temp_dir.path().join("node_modules/pkg/index.js"), "x");
        touch(&temp_dir.path().join("src/app.js"), "x");

        let files = collect_files(temp_dir.path(), &HashSet::new()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains_key("src/app.js"));
    }

    #[test]
    fn test_ignored_files_are_excluded_by_relative_path() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join(".git/config"), "x");
        touch(&temp_dir.path().join("photo.png"), "x");
        touch(&temp_dir.path().join("logs/app.log"), "x");
        touch(&temp_dir.path().join("main.go"), "x");

        let files = collect_files(temp_dir.path(), &HashSet::new()).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains_key("main.go"));
    }

    #[test]
    fn test_caller_exclusion_set_is_honored() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("a.txt"), "x");
        touch(&temp_dir.path().join("b.txt"), "x");

        let mut excluded = HashSet::new();
        excluded.insert("a.txt".to_string());

        let files = collect_files(temp_dir.path(), &excluded).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files.contains_key("b.txt"));
    }

    #[test]
    fn test_result_keys_are_sorted() {
        let temp_dir = TempDir::new().unwrap();
        touch(&temp_dir.path().join("z.txt"), "x");
        touch(&temp_dir.path().join("a.txt"), "x");
        touch(&temp_dir.path().join("m/n.txt"), "x");

        let files = collect_files(temp_dir.path(), &HashSet::new()).unwrap();
        let keys: Vec<&String> = files.keys().collect();

        assert_eq!(keys, vec!["a.txt", "m/n.txt", "z.txt"]);
    }
}
