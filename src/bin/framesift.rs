use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use framesift::{
    DEFAULT_LABEL_PREFIX, FfmpegLogLevel, FrameSelector, ProgressCallback, ProgressInfo,
    SamplingConfig, SelectionReport,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

const CLI_AFTER_HELP: &str = "Examples:\n  framesift\n  framesift --dir ~/videos --progress\n  framesift --dir . --verbose --log-level quiet";

#[derive(Debug, Parser)]
#[command(
    name = "framesift",
    version,
    about = "Sample frames from every video in a directory and keep them by blur score",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Directory to scan. Prompted for when omitted (empty keeps the current directory).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Show debug-level logging, including every kept and discarded frame.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar of frames read per video.
    #[arg(long)]
    progress: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} frames {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }

    fn start(&self) {
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_message("");
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current));
        }
        self.bar.set_position(info.current);
        self.bar.set_message(format!("{} kept", info.frames_written));
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn resolve_directory(cli_dir: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let current = env::current_dir()?;
    println!("Current directory: {}", current.display());

    let chosen = match cli_dir {
        Some(dir) => dir,
        None => {
            let answer: String = Input::new()
                .with_prompt("Enter a new directory (leave empty to keep it)")
                .allow_empty(true)
                .interact_text()?;
            PathBuf::from(answer.trim())
        }
    };

    let resolved = if chosen.as_os_str().is_empty() {
        current
    } else if chosen.is_absolute() {
        chosen
    } else {
        current.join(chosen)
    };

    if !resolved.is_dir() {
        return Err(format!("not a directory: {}", resolved.display()).into());
    }
    Ok(resolved)
}

fn print_summary(video: &Path, report: &SelectionReport) {
    let name = video
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!(
        "{} {}",
        "done:".green().bold(),
        format!(
            "{name}: kept {}, discarded {}, {} frame(s) read -> {}",
            report.frames_written.len(),
            report.frames_discarded,
            report.frames_read,
            report.output_dir.display()
        )
        .green()
    );
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(level) = cli.log_level {
        framesift::set_ffmpeg_log_level(level);
    }

    let directory = resolve_directory(cli.dir)?;
    println!("Current directory: {}", directory.display());

    let mut config = SamplingConfig::new();
    let progress = if cli.progress {
        let progress = Arc::new(TerminalProgress::new()?);
        config = config.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let selector = FrameSelector::new(config, framesift::run_label_now(DEFAULT_LABEL_PREFIX));

    for video in framesift::find_videos(&directory, selector.config().video_extension())? {
        if let Some(name) = video.file_name() {
            println!("{}", name.to_string_lossy());
        }
        if let Some(progress) = &progress {
            progress.start();
        }

        let report = selector.process_video(&video)?;

        if let Some(progress) = &progress {
            progress.bar.finish_and_clear();
        }
        print_summary(&video, &report);
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
