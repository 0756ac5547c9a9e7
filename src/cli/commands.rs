use crate::core::assembler::{format_output, generate_output};
use crate::core::file_selector::select_files;
use crate::domain::models::{AppState, CombineConfig, FileEntry};
use crate::infra::file_system::collect_files;
use crate::infra::logger::setup_logger;
use crate::infra::output::write_output;
use crate::infra::staging::{StagedFile, cleanup_staged, is_staged_location, stage_files};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "filecat")]
#[command(about = "Combine selected files into one labeled text file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    Combine {
        /// Individual files to include; each is copied to temporary
        /// storage and keyed by its bare filename
        #[arg(long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,

        /// Directory to scan recursively; silently skipped if it does
        /// not exist
        #[arg(long)]
        dir: Option<String>,

        #[arg(long, default_value = "combined_content.txt")]
        output: String,

        /// Print the combined output instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Copy the combined output to the clipboard
        #[arg(long)]
        clipboard: bool,

        /// Include every discovered file without interactive selection
        #[arg(long)]
        auto: bool,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    match cli.command {
        Commands::Combine {
            files,
            dir,
            output,
            stdout,
            clipboard,
            auto,
        } => {
            info!("Starting combine command");
            debug!(
                "Command parameters: files={:?}, dir={:?}, output={}, stdout={}, clipboard={}, auto={}",
                files, dir, output, stdout, clipboard, auto
            );

            let config = CombineConfig {
                staged_paths: files,
                dir_path: dir,
                output_path: output,
                to_stdout: stdout,
                to_clipboard: clipboard,
                auto_select: auto,
            };

            combine(&config)?;
        }
    }
    Ok(())
}

fn combine(config: &CombineConfig) -> anyhow::Result<()> {
    let staged = stage_files(&config.staged_paths)?;

    // Temp copies must go away on every exit path, including a cancelled
    // selection, so the session result is held until cleanup has run.
    let result = run_session(config, &staged);
    cleanup_staged(&staged);
    result
}

fn run_session(config: &CombineConfig, staged: &[StagedFile]) -> anyhow::Result<()> {
    let files = discover_files(config, staged)?;

    if files.is_empty() {
        info!("No files discovered, nothing to combine");
        return Ok(());
    }

    let state = AppState::with_files(files).editable();

    info!("Selecting files");
    let (state, generate) = select_files(state, config.auto_select)?;

    if !generate {
        info!("Selection closed without generating output");
        return Ok(());
    }

    info!("Building combined output");
    let (state, output) = generate_output(state);
    let formatted = format_output(&output);
    debug!(
        "Session reached {:?} with {} of {} files included",
        state.phase,
        state.included_count(),
        state.file_count()
    );

    info!("Writing output");
    write_output(
        &formatted,
        &config.output_path,
        config.to_stdout,
        config.to_clipboard,
    )
}

/// Merges staged copies with directory discoveries into one mapping keyed
/// by relative name. Directory entries are merged second, so on a name
/// collision the directory file wins.
fn discover_files(
    config: &CombineConfig,
    staged: &[StagedFile],
) -> anyhow::Result<BTreeMap<String, FileEntry>> {
    let mut files = BTreeMap::new();

    for file in staged {
        files.insert(
            file.name.clone(),
            FileEntry {
                name: file.name.clone(),
                location: file.path.clone(),
            },
        );
    }

    if let Some(dir) = &config.dir_path {
        let root = Path::new(dir);
        if root.exists() {
            info!("Scanning directory {}", dir);
            for (rel_path, abs_path) in collect_files(root, &HashSet::new())? {
                let entry = FileEntry {
                    name: rel_path.clone(),
                    location: abs_path,
                };
                if let Some(previous) = files.insert(rel_path.clone(), entry) {
                    if is_staged_location(&previous.location) {
                        debug!("Directory entry {} shadows a staged copy", rel_path);
                    }
                }
            }
        } else {
            debug!("Directory path does not exist, skipping: {}", dir);
        }
    }

    info!("Discovered {} files", files.len());
    Ok(files)
}
