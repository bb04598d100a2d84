use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use product_rank::config::{self, OutputFormat};
use product_rank::{input, logging, output, Pipeline, RankError};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "product-rank")]
#[command(about = "Rank product listings against a target category", long_about = None)]
#[command(version)]
struct Cli {
    /// Category to rank against (built-in: salmon, peanuts)
    #[arg(long, default_value = "salmon")]
    category: String,

    /// JSON file with an array of products ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to config file (defaults to ~/.config/product-rank/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Category override file (defaults to <config dir>/category/<category>.yaml)
    #[arg(long)]
    category_file: Option<PathBuf>,

    /// Output format (overrides output.format from the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Weight of the rule-based score in the final score
    #[arg(long)]
    rule_weight: Option<f64>,

    /// Weight of the semantic score in the final score
    #[arg(long)]
    semantic_weight: Option<f64>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let start_time = Instant::now();

    let reads_stdin = cli
        .input
        .as_deref()
        .map_or(true, |p| p == Path::new("-"));
    if cli.input.is_none() && input::stdin_is_terminal() {
        eprintln!("No input provided.");
        eprintln!("Pipe a JSON array of products or pass a file:");
        eprintln!("  product-rank --category salmon -i products.json");
        eprintln!("  cat products.json | product-rank --category peanuts");
        std::process::exit(EXIT_INPUT);
    }

    // Load config
    let mut settings = match config::load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    settings.scoring = settings
        .scoring
        .with_overrides(cli.rule_weight, cli.semantic_weight);
    if let Some(format) = cli.format {
        settings.output.format = format;
    }

    // Category files live next to the main config file
    let config_dir = match &cli.config {
        Some(path) => path.parent().map(|p| p.to_path_buf()),
        None => config::get_config_dir(),
    };

    let category = match config::load_category(
        &cli.category,
        cli.category_file.as_deref(),
        config_dir.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let pipeline = match Pipeline::from_config(&category, &settings.scoring) {
        Ok(p) => p,
        Err(RankError::InvalidConfig(errors)) => {
            eprintln!("Category config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let products = match input::load_products(cli.input.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            let source = if reads_stdin { "stdin" } else { "input file" };
            eprintln!("Input error ({}): {:#}", source, e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let ranked = pipeline.process(products);
    let count = ranked.len();

    let rendered = match output::render(ranked, &settings.output) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Output error: {:#}", e);
            std::process::exit(EXIT_OUTPUT);
        }
    };
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    info!(
        "Ranked {} products for '{}' in {:?}",
        count,
        category.category_name,
        start_time.elapsed()
    );
    std::process::exit(EXIT_SUCCESS);
}
