use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fpst::output::{print_levels, print_report};
use fpst::params::{prime_bound, Params};
use fpst::stats::BuildReport;
use fpst::text::{load_text, random_text};
use fpst::tree::SuffixTree;
use fpst::utils::{BuildConfig, Spinner};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Alphabet assumed for texts loaded from files
const FILE_ALPHABET: u16 = 256;

#[derive(Parser)]
#[command(name = "fpst")]
#[command(about = "Sparse suffix trees built with Karp-Rabin fingerprints")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log construction details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read the build configuration from this file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a suffix tree and report its shape
    Build(BuildArgs),
    /// Suggest a random prime and base for a text length
    Params {
        #[command(flatten)]
        text: TextArgs,
    },
    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        text: TextArgs,

        /// Write it to the user config directory
        #[arg(long)]
        save: bool,
    },
}

#[derive(Args)]
struct TextArgs {
    /// Text length including the sentinel
    #[arg(short = 'n', long = "len")]
    text_len: Option<usize>,

    /// Generated symbols are drawn from [1, K]
    #[arg(long = "alphabet", value_name = "K")]
    alphabet_size: Option<u16>,

    /// Collision exponent c in p >= n^(3 + c)
    #[arg(long = "exponent", value_name = "C")]
    exponent_c: Option<f64>,

    /// Seed for text generation and parameter search
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct BuildArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Build over a file instead of a random text (line breaks are dropped)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Block length B
    #[arg(short = 'B', long, conflicts_with = "blocks")]
    block_len: Option<usize>,

    /// Number of blocks b, giving B = ceil(n / b)
    #[arg(short = 'b', long)]
    blocks: Option<usize>,

    /// Print every edge label level by level
    #[arg(long)]
    dump: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Check every root-to-leaf path against the text
    #[arg(long)]
    verify: bool,
}

impl TextArgs {
    fn apply(&self, config: &mut BuildConfig) {
        if let Some(text_len) = self.text_len {
            config.text_len = text_len;
        }
        if let Some(alphabet_size) = self.alphabet_size {
            config.alphabet_size = alphabet_size;
        }
        if let Some(exponent_c) = self.exponent_c {
            config.exponent_c = exponent_c;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

impl BuildArgs {
    fn apply(&self, config: &mut BuildConfig) {
        self.text.apply(config);
        if let Some(blocks) = self.blocks {
            config.blocks = blocks;
            config.block_len = None;
        }
        if self.block_len.is_some() {
            config.block_len = self.block_len;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = BuildConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Build(args) => {
            args.apply(&mut config);
            run_build(&args, &config)?;
        }
        Commands::Params { text } => {
            text.apply(&mut config);
            run_params(&config)?;
        }
        Commands::Config { text, save } => {
            text.apply(&mut config);
            println!("{}", serde_json::to_string_pretty(&config)?);
            if save {
                let path = config.save()?;
                eprintln!("Saved config to: {}", path.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn seeded_rng(config: &BuildConfig) -> (u64, StdRng) {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "random generator seeded");
    (seed, StdRng::seed_from_u64(seed))
}

fn run_build(args: &BuildArgs, config: &BuildConfig) -> Result<()> {
    let silent = args.json || !std::io::stderr().is_terminal();
    let (seed, mut rng) = seeded_rng(config);

    let (text, alphabet_size) = match &args.input {
        Some(path) => (load_text(path, Some(config.text_len))?, FILE_ALPHABET),
        None => (
            random_text(config.text_len, config.alphabet_size, &mut rng)?,
            config.alphabet_size,
        ),
    };
    let block_len = config.effective_block_len(text.len())?;
    if block_len >= text.len() && !text.is_empty() {
        warn!(block_len, n = text.len(), "block length covers the whole text");
    }

    let spinner = Spinner::start("Selecting prime and base...", silent);
    let started = Instant::now();
    let params = Params::generate(text.len(), alphabet_size, config.exponent_c, block_len, &mut rng)?;
    let params_time = started.elapsed();
    spinner.finish("Parameters selected", params_time);

    info!(n = text.len(), block_len, "building suffix tree");
    let spinner = Spinner::start("Building suffix tree...", silent);
    let started = Instant::now();
    let tree = SuffixTree::build(&text, &params);
    let build_time = started.elapsed();
    spinner.finish("Suffix tree built", build_time);

    let mut report = BuildReport::new(&tree, &params, Some(seed)).with_timings(params_time, build_time);
    let verification = if args.verify {
        let outcome = tree.verify();
        report = report.with_verified(outcome.is_ok());
        outcome
    } else {
        Ok(())
    };

    let color = std::io::stdout().is_terminal();
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        if args.dump {
            print_levels(&tree.levels(), color).context("Failed to print level dump")?;
            println!();
        }
        print_report(&report, color).context("Failed to print report")?;
    }

    verification.context("Suffix tree verification failed")
}

fn run_params(config: &BuildConfig) -> Result<()> {
    let (_, mut rng) = seeded_rng(config);
    let bound = prime_bound(config.text_len, config.alphabet_size, config.exponent_c)?;
    let block_len = config.effective_block_len(config.text_len)?;
    let params = Params::generate(config.text_len, config.alphabet_size, config.exponent_c, block_len, &mut rng)?;

    println!("bound: {}", bound);
    println!("p:     {}", params.p());
    println!("x:     {}", params.x());
    println!("B:     {}", params.block_len());
    Ok(())
}
