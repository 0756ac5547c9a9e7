#[cfg(feature = "clipboard-support")]
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
#[cfg(feature = "clipboard-support")]
use log::warn;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

pub trait OutputWriter {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

pub struct FileWriter {
    path: String,
}

impl FileWriter {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing combined output to file: {}", self.path);
        fs::write(Path::new(&self.path), content)?;
        info!("Combined output written to file: {}", self.path);
        Ok(())
    }
}

pub struct ConsoleWriter;

impl OutputWriter for ConsoleWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing combined output to console");
        io::stdout().write_all(content.as_bytes())?;
        io::stdout().write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(feature = "clipboard-support")]
pub struct ClipboardWriter;

#[cfg(feature = "clipboard-support")]
impl OutputWriter for ClipboardWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing combined output to clipboard");

        let mut ctx: ClipboardContext = match ClipboardProvider::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
                return Err(anyhow::anyhow!("Failed to access clipboard: {}", e));
            }
        };

        match ctx.set_contents(content.to_owned()) {
            Ok(_) => {
                info!("Output copied to clipboard (size: {} bytes)", content.len());
                Ok(())
            }
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                Err(anyhow::anyhow!("Failed to copy to clipboard: {}", e))
            }
        }
    }
}

pub fn create_writer(
    output_path: &str,
    to_stdout: bool,
    to_clipboard: bool,
) -> Box<dyn OutputWriter> {
    #[cfg(feature = "clipboard-support")]
    if to_clipboard {
        return Box::new(ClipboardWriter) as Box<dyn OutputWriter>;
    }
    #[cfg(not(feature = "clipboard-support"))]
    if to_clipboard {
        log::error!("Clipboard support is not compiled in; writing to {} instead", output_path);
    }

    if to_stdout {
        Box::new(ConsoleWriter) as Box<dyn OutputWriter>
    } else {
        Box::new(FileWriter::new(output_path.to_string())) as Box<dyn OutputWriter>
    }
}

pub fn write_output(
    content: &str,
    output_path: &str,
    to_stdout: bool,
    to_clipboard: bool,
) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    let writer = create_writer(output_path, to_stdout, to_clipboard);
    writer.write(content)?;

    #[cfg(feature = "clipboard-support")]
    let clipboard_used = to_clipboard;
    #[cfg(not(feature = "clipboard-support"))]
    let clipboard_used = false;

    if clipboard_used && !to_stdout {
        stdout.execute(SetForegroundColor(Color::Green))?;
        writeln!(stdout, "\n📋 Combined content copied to clipboard!")?;
        stdout.execute(ResetColor)?;

        writeln!(stdout, "\nPreview of copied content:\n")?;

        let preview_length = 200;
        let preview = if content.chars().count() > preview_length {
            let safe_substring: String = content.chars().take(preview_length).collect();
            format!("{}...", safe_substring)
        } else {
            content.to_string()
        };

        writeln!(stdout, "{}", preview)?;
    } else if !to_stdout {
        stdout.execute(SetForegroundColor(Color::Green))?;
        writeln!(stdout, "✓ Combined content written to {}", output_path)?;
        stdout.execute(ResetColor)?;
    }

    Ok(())
}
