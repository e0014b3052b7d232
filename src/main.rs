//! slide: sliding-window statistics over sorted genomic interval streams
//!
//! Usage: slide <COMMAND> -w SIZE -s STEP [OPTIONS]

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use slide_genomics::bed::SlideError;
use slide_genomics::commands::{
    ChainCommand, GffCountCommand, GffCoveredCommand, PointMeanCommand, SlidingMeanCommand,
    SlidingSumCommand, SyncSumCommand,
};
use slide_genomics::config::WindowConfig;

#[derive(Parser)]
#[command(name = "slide")]
#[command(version)]
#[command(about = "Sliding-window statistics over sorted genomic interval streams", long_about = None)]
struct Cli {
    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every windowed command.
#[derive(Args)]
struct WindowArgs {
    /// Window size
    #[arg(short = 'w', long, allow_hyphen_values = true)]
    size: String,

    /// Distance between consecutive window starts
    #[arg(short = 's', long, allow_hyphen_values = true)]
    step: String,

    /// Input file (use - for stdin, the default)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Skip the sort-order check (input must already be sorted)
    #[arg(long)]
    assume_sorted: bool,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,
}

impl WindowArgs {
    fn config(&self) -> Result<WindowConfig, SlideError> {
        WindowConfig::parse(&self.size, &self.step)
    }

    fn open_input(&self) -> Result<Box<dyn Read + Send>, SlideError> {
        match &self.input {
            Some(path) if path.to_string_lossy() != "-" => Ok(Box::new(File::open(path)?)),
            _ => Ok(Box::new(io::stdin())),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Mean of `chrom start end value` records in each window
    Mean {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Sum of `chrom start end value` records in each window
    Sum {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Number of point sites (`chrom pos ...`) in each window
    SyncSum {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Mean of a per-site statistic over point sites in each window
    PointMean {
        #[command(flatten)]
        window: WindowArgs,

        /// 0-based column holding the statistic
        #[arg(long)]
        value_column: usize,
    },

    /// Number of GFF features in each window
    GffCount {
        #[command(flatten)]
        window: WindowArgs,

        /// Only count features of this type (GFF column 3)
        #[arg(long)]
        feature_type: Option<String>,
    },

    /// Number of distinct bases covered by GFF features in each window
    GffCovered {
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Absolute value, then sliding mean, then log10 of the mean
    Chain {
        #[command(flatten)]
        window: WindowArgs,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Mean { window } => run_mean(window),
        Commands::Sum { window } => run_sum(window),
        Commands::SyncSum { window } => run_sync_sum(window),
        Commands::PointMean {
            window,
            value_column,
        } => run_point_mean(window, value_column),
        Commands::GffCount {
            window,
            feature_type,
        } => run_gff_count(window, feature_type),
        Commands::GffCovered { window } => run_gff_covered(window),
        Commands::Chain { window } => run_chain(window),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_mean(args: WindowArgs) -> Result<(), SlideError> {
    let cmd = SlidingMeanCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("Sliding mean stats: {}", result);
    }
    Ok(())
}

fn run_sum(args: WindowArgs) -> Result<(), SlideError> {
    let cmd = SlidingSumCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("Sliding sum stats: {}", result);
    }
    Ok(())
}

fn run_sync_sum(args: WindowArgs) -> Result<(), SlideError> {
    let cmd = SyncSumCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("Sync sum stats: {}", result);
    }
    Ok(())
}

fn run_point_mean(args: WindowArgs, value_column: usize) -> Result<(), SlideError> {
    let cmd = PointMeanCommand::new(args.config()?, value_column)
        .with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("Point mean stats: {}", result);
    }
    Ok(())
}

fn run_gff_count(args: WindowArgs, feature_type: Option<String>) -> Result<(), SlideError> {
    let mut cmd = GffCountCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    if let Some(t) = feature_type {
        cmd = cmd.with_feature_type(t);
    }
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("GFF count stats: {}", result);
    }
    Ok(())
}

fn run_gff_covered(args: WindowArgs) -> Result<(), SlideError> {
    let cmd = GffCoveredCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("GFF covered stats: {}", result);
    }
    Ok(())
}

fn run_chain(args: WindowArgs) -> Result<(), SlideError> {
    let cmd = ChainCommand::new(args.config()?).with_assume_sorted(args.assume_sorted);
    let input = args.open_input()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let result = cmd.run(input, &mut handle)?;

    if args.stats {
        eprintln!("Chain stats: {}", result);
    }
    Ok(())
}
