use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::{Target, WriteStyle};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use serde_json::json;
use keytrim::{
    DatasetSummary, ExecutionMode, ProgressCallback, ProgressInfo, TrimOptions, check_layout,
    layout, process_dataset, resolve_worker_count,
};

const CLI_AFTER_HELP: &str = "Examples:\n  keytrim --dry-run\n  keytrim\n  keytrim --multiprocessing --workers 4\n  keytrim --data-root /path/to/data --output /path/to/output\n  keytrim check --data-root /path/to/data\n  keytrim completions zsh > _keytrim";

const RULE_WIDTH: usize = 80;

#[derive(Debug, Parser)]
#[command(
    name = "keytrim",
    version,
    about = "Trim Korean Sign Language keypoint data (F view only)",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    trim: TrimArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Parser, Clone)]
struct TrimArgs {
    /// Root directory of the dataset.
    #[arg(long, global = true, default_value = "SignLanguageSets")]
    data_root: PathBuf,

    /// Output directory for trimmed data.
    #[arg(long, global = true, default_value = "SignLanguageSets_Trimmed")]
    output: PathBuf,

    /// Show what would be done without copying any files.
    #[arg(long)]
    dry_run: bool,

    /// Path to save the per-folder error report.
    #[arg(long, default_value = "preprocessing_errors.log")]
    error_log: PathBuf,

    /// Process folders on a worker pool.
    #[arg(long)]
    multiprocessing: bool,

    /// Worker pool size (default: CPU count - 1).
    #[arg(long)]
    workers: Option<usize>,

    /// Path to save the processing log (not written in dry runs).
    #[arg(long, default_value = "preprocessing.log")]
    log_file: PathBuf,

    /// Frames of padding kept before the gesture start and after its end.
    #[arg(long, default_value_t = keytrim::DEFAULT_OFFSET)]
    offset: u32,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Show per-folder debug logging.
    #[arg(long)]
    verbose: bool,

    /// Print the final summary as machine-readable JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check the dataset layout without processing anything.
    #[command(
        about = "Check dataset layout",
        after_help = "Examples:\n  keytrim check\n  keytrim check --data-root /path/to/data --output /path/to/output"
    )]
    Check,

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Writes every log line to stderr and, when configured, to the run log.
struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buffer)?;
        if let Some(file) = &mut self.file {
            file.write_all(buffer)?;
        }
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file = log_file
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format(|buffer, record| {
            writeln!(
                buffer,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(LogSink { file })))
        .try_init()?;

    Ok(())
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "Processing folders {spinner:.green} {bar:40.cyan/blue} {pos}/{len} folder {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    // Pool workers report out of order, so only count up here.
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_length(info.total);
        self.bar.inc(1);
        self.bar.set_message(info.folder_name.clone());
    }
}

fn execution_mode(args: &TrimArgs, available_cores: usize) -> ExecutionMode {
    if args.multiprocessing {
        ExecutionMode::Parallel {
            workers: resolve_worker_count(args.workers, available_cores),
        }
    } else {
        ExecutionMode::Sequential
    }
}

fn print_header(args: &TrimArgs, execution: ExecutionMode) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", "Korean Sign Language Data Preprocessing".bold());
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Data root:       {}", args.data_root.display());
    println!("Output:          {}", args.output.display());
    println!(
        "Mode:            {}",
        if args.dry_run {
            "DRY RUN".yellow()
        } else {
            "PROCESSING".green()
        }
    );
    match execution {
        ExecutionMode::Sequential => println!("Multiprocessing: Disabled"),
        ExecutionMode::Parallel { workers } => {
            println!("Multiprocessing: Enabled");
            println!("Workers:         {workers}");
        }
    }
    println!("Offset:          {} frames", args.offset);
    println!("Log file:        {}", args.log_file.display());
    println!("Error log:       {}", args.error_log.display());
    println!();
}

fn summary_json(summary: &DatasetSummary) -> serde_json::Value {
    json!({
        "success": summary.success_count,
        "skipped": summary.skip_count,
        "errors": summary.error_count,
        "total_frames": summary.total_frames,
        "kept_frames": summary.kept_frames,
        "trimmed_frames": summary.trimmed_frames,
        "reduction_percent": summary.reduction_percentage(),
        "error_messages": summary.errors,
    })
}

fn trim(args: &TrimArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.verbose, (!args.dry_run).then_some(args.log_file.as_path()))?;

    let execution = execution_mode(args, num_cpus::get());
    print_header(args, execution);

    if let Err(error) = layout::require_dataset_root(&args.data_root) {
        log::error!("{error}");
        return Err(error.into());
    }

    if !args.dry_run {
        fs::create_dir_all(&args.output)?;
        log::info!("Output directory created/verified: {}", args.output.display());
    }

    let mut options = TrimOptions::new()
        .with_offset(args.offset)
        .with_dry_run(args.dry_run)
        .with_execution(execution);
    let progress = if args.no_progress {
        None
    } else {
        Some(Arc::new(TerminalProgress::new()?))
    };
    if let Some(progress) = &progress {
        options = options.with_progress(progress.clone());
    }

    let started_at = chrono::Local::now();
    let timer = Instant::now();
    log::info!("Processing started at {}", started_at.format("%Y-%m-%d %H:%M:%S"));

    println!("{}", "=".repeat(RULE_WIDTH));
    let summary = process_dataset(&args.data_root, &args.output, &options);
    if let Some(progress) = &progress {
        progress.bar.finish_and_clear();
    }
    let summary = summary?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&summary))?);
    } else {
        println!();
        println!("{}", "=".repeat(RULE_WIDTH));
        print!("{summary}");
    }

    if summary.write_error_log(&args.error_log)? {
        eprintln!(
            "{} {}",
            "warning:".yellow().bold(),
            format!(
                "{} folder(s) failed; see {}",
                summary.error_count,
                args.error_log.display()
            )
            .yellow()
        );
    }

    let elapsed = timer.elapsed();
    log::info!(
        "Processing completed at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    log::info!("Total duration: {elapsed:.3?}");
    if !args.json {
        println!();
        println!(
            "{} {}",
            "done:".green().bold(),
            format!("Total processing time: {elapsed:.3?}").green()
        );
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None => trim(&cli.trim)?,
        Some(Commands::Check) => {
            let report = check_layout(&cli.trim.data_root, &cli.trim.output);
            print!("{report}");
            if !report.is_valid() {
                return Err("dataset layout check failed".into());
            }
            println!("{}", "layout ok".green().bold());
        }
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "keytrim", &mut io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
