use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use console::{Term, style};
use log::{debug, info};
use niclean::component::MediaCleaner;
use niclean::component::media_cleaner::{NoProgress, ProgressBarSink, RunResult};
use niclean::config::{NamingMode, OutputMode, Settings, SettingsLayer, load_layer};
use niclean::error::CleanError;
use niclean::menu::{prompt_input_dir, prompt_settings, run_with_progress};
use niclean::tools::{Toolset, current_platform, default_bundled_dir};
use niclean::{init, pause, print_summary};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "niclean")]
#[command(version)]
#[command(about = "Copy photos and videos into a clean folder, strip their metadata and rename them like a phone camera")]
#[command(long_about = "Copies every image and video of a folder, removes its metadata (exiftool for images, ffmpeg for videos) and renames it iPhone style (IMG_0001.JPG, VID_0001.MOV) or Android style (IMG_20240101_120000.JPG).

Settings are read from niclean.conf in the input folder or next to the executable; command line flags win over the file.
Run without arguments on a terminal for interactive mode.")]
struct Cli {
    /// Increase verbosity (-v=INFO, -vv=DEBUG, -vvv=TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Folder to clean
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output folder: a name relative to the input folder, or an absolute path.
    /// Must not be the input folder itself or one of its parents
    #[arg(short, long)]
    output: Option<String>,

    /// sequential (iphone), timestamped (android) or original
    #[arg(long)]
    naming: Option<NamingMode>,

    /// subfolder or in-place
    #[arg(long, conflicts_with = "in_place")]
    output_mode: Option<OutputMode>,

    /// Replace the originals instead of writing a subfolder
    #[arg(long)]
    in_place: bool,

    /// Also clean files in subfolders
    #[arg(short = 'r', long)]
    include_subfolders: bool,

    /// Show what would happen without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Do not copy the source timestamps onto the cleaned files
    #[arg(long)]
    no_keep_timestamps: bool,

    /// Abort if exiftool or ffmpeg is missing
    #[arg(long)]
    strict_tools: bool,

    /// Re-encode videos that cannot be remuxed
    #[arg(long)]
    reencode_fallback: bool,

    /// Do not open the output folder when done
    #[arg(long)]
    no_open: bool,

    /// Config file to use instead of searching for one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder holding bundled exiftool/ffmpeg
    #[arg(long)]
    tools_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Ask for the folder and options
    #[arg(long)]
    interactive: bool,
}

impl Cli {
    fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            naming: self.naming,
            output_mode: if self.in_place {
                Some(OutputMode::InPlace)
            } else {
                self.output_mode
            },
            output_folder: self.output.clone(),
            include_subfolders: self.include_subfolders.then_some(true),
            dry_run: self.dry_run.then_some(true),
            keep_timestamps: self.no_keep_timestamps.then_some(false),
            strict_tools: self.strict_tools.then_some(true),
            reencode_fallback: self.reencode_fallback.then_some(true),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init::init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            let code = e
                .downcast_ref::<CleanError>()
                .map_or(1, CleanError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let term = Term::stdout();
    let interactive = cli.interactive || (cli.input.is_none() && term.is_term());

    let input_dir = match (&cli.input, interactive) {
        (Some(input), _) => input.clone(),
        (None, true) => match prompt_input_dir(&term)? {
            Some(input) => input,
            None => return Ok(ExitCode::SUCCESS),
        },
        (None, false) => Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "an input folder is required (--input <FOLDER>)",
            )
            .exit(),
    };

    let mut settings = resolve_settings(cli, &input_dir)?;
    if interactive {
        settings = match prompt_settings(&term, &settings)? {
            Some(settings) => settings,
            None => {
                println!("{}", style("Cancelled").yellow());
                return Ok(ExitCode::SUCCESS);
            }
        };
    }
    debug!("Settings: {settings:?}");

    let platform = current_platform();
    let bundled_dir = cli.tools_dir.clone().or_else(default_bundled_dir);
    let toolset = Toolset::discover(bundled_dir.as_deref(), platform);
    info!("Platform: {}", platform.name());

    let cleaner = MediaCleaner::new(settings, toolset, platform);
    let result = if interactive {
        run_with_progress(cleaner, input_dir)??
    } else if cli.json {
        cleaner.run(&input_dir, &NoProgress)?
    } else {
        cleaner.run(&input_dir, &ProgressBarSink::new())?
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize the result")?
        );
    } else {
        print_summary(&result);
    }

    if !cli.no_open {
        open_output(&result);
    }

    if interactive {
        pause(&term)?;
    }

    Ok(if result.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Defaults, then the config file, then the command line.
fn resolve_settings(cli: &Cli, input_dir: &Path) -> Result<Settings> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut search_dirs = vec![input_dir];
    if let Some(exe_dir) = exe_dir.as_deref() {
        search_dirs.push(exe_dir);
    }

    let file_layer = load_layer(cli.config.as_deref(), &search_dirs)?;
    Ok(Settings::resolve(&[&file_layer, &cli.settings_layer()]))
}

fn open_output(result: &RunResult) {
    if result.dry_run || result.processed == 0 {
        return;
    }
    if let Err(e) = current_platform().open_folder(&result.output_dir) {
        debug!("Could not open {}: {e:#}", result.output_dir.display());
    }
}
