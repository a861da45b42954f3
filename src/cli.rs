/// Command-line arguments.
use clap::{ArgAction, Parser, ValueEnum};
use foldergauge_core::scanner::path::sanitize_input;
use foldergauge_core::scanner::DEFAULT_TOP_N;
use foldergauge_core::{ScanOptions, ScanTarget};
use foldergauge_report::{ChartReport, CsvReport, JsonReport, Render, TextReport};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "foldergauge",
    version,
    about = "Measure folder disk usage and break it down by file category"
)]
pub struct Cli {
    /// Folders to scan. Surrounding quotes and a trailing '>' are stripped.
    pub paths: Vec<String>,

    /// Also scan the standard user folders (Downloads, Pictures, Desktop,
    /// Documents, Music, Videos)
    #[arg(long)]
    pub user_folders: bool,

    /// Number of heaviest files and folders to list
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Override the number of heaviest files
    #[arg(long, value_name = "N")]
    pub top_files: Option<usize>,

    /// Override the number of heaviest folders
    #[arg(long, value_name = "N")]
    pub top_folders: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// JSON file with the category table to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub categories: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Chart,
    Json,
    Csv,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            top_files: self.top_files.unwrap_or(self.top),
            top_folders: self.top_folders.unwrap_or(self.top),
        }
    }

    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn renderer(&self) -> Box<dyn Render> {
        match self.format {
            Format::Text => Box::new(TextReport),
            Format::Chart => Box::new(ChartReport::default()),
            Format::Json => Box::new(JsonReport {
                pretty: self.pretty,
                generated_at: None,
            }),
            Format::Csv => Box::new(CsvReport),
        }
    }

    /// Everything to scan: explicit paths first, then the user folders.
    /// With neither, the current directory.
    pub fn targets(&self) -> Vec<ScanTarget> {
        let mut targets: Vec<ScanTarget> = self
            .paths
            .iter()
            .map(|raw| ScanTarget::from_path(sanitize_input(raw)))
            .collect();
        if self.user_folders {
            targets.extend(user_folders());
        }
        if targets.is_empty() {
            targets.push(ScanTarget::new(".", "."));
        }
        targets
    }
}

/// Standard per-user folders that exist on this platform.
fn user_folders() -> Vec<ScanTarget> {
    [
        ("Downloads", dirs::download_dir()),
        ("Pictures", dirs::picture_dir()),
        ("Desktop", dirs::desktop_dir()),
        ("Documents", dirs::document_dir()),
        ("Music", dirs::audio_dir()),
        ("Videos", dirs::video_dir()),
    ]
    .into_iter()
    .filter_map(|(name, dir)| dir.map(|path| ScanTarget::new(name, path)))
    .collect()
}
