use globset::{Glob, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;

/// Fixed ignore list, matched against relative paths and bare names.
/// One string per pattern; keep it that way, a missing comma would silently
/// merge two neighbors into one compound pattern.
pub const IGNORE_PATTERNS: &[&str] = &[
    // Virtual environments
    "env/*",
    ".env/*",
    "venv/*",
    ".venv/*",
    // Git
    ".gitignore",
    ".git/*",
    // Python caches
    "__pycache__/*",
    "*.pyc",
    "*.pyo",
    // Test caches and coverage
    ".pytest_cache/*",
    ".coverage",
    // OS metadata
    ".DS_Store",
    "*.DS_Store",
    "*._.DS_Store",
    "Thumbs.db",
    // Node.js
    "node_modules/*",
    ".npm/*",
    // Caches and logs
    ".cache/*",
    "*.log",
    // Minified and web assets
    "*.min",
    "*.min.css",
    "*.min.js",
    "*.svg",
    "*.woff",
    "*.woff2",
    // Documents and images
    "*.pdf",
    "*.png",
    "*.jpg",
    "*.jpeg",
    "*.gif",
    "*.ico",
    // Archives
    "*.zip",
    "*.tar",
    "*.gz",
    "*.rar",
    "*.7z",
    // Executables and libraries
    "*.exe",
    "*.dll",
    "*.so",
    "*.dylib",
    // Databases
    "*.db",
    "*.sqlite",
    "*.sqlite3",
    // Serialized binary data
    "*.pkl",
    "*.pickle",
    "*.bin",
    "*.dat",
    // Media
    "*.mp3",
    "*.wav",
    "*.mp4",
    "*.avi",
    "*.mov",
    // Office files
    "*.doc",
    "*.docx",
    "*.xls",
    "*.xlsx",
    "*.ppt",
    // Design files
    "*.psd",
    "*.ai",
];

static IGNORE_SET: Lazy<GlobSet> = Lazy::new(|| {
    let mut builder = GlobSetBuilder::new();
    for pattern in IGNORE_PATTERNS {
        builder.add(Glob::new(pattern).expect("invalid built-in ignore pattern"));
    }
    builder.build().expect("failed to compile ignore pattern set")
});

/// True when the given relative path or bare name matches any built-in
/// ignore pattern. Pure function of the input and the fixed pattern list.
pub fn should_ignore(path: &str) -> bool {
    IGNORE_SET.is_match(path)
}
