//! Synonym Benchmark CLI
//!
//! Evaluates pretrained word-embedding models on a multiple-choice synonym
//! test and writes per-model and cross-model CSV reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use synonym_bench::{
    config::Config,
    dataset::Dataset,
    eval::{CancelToken, run_batch},
    report::ReportWriter,
    store::ModelStore,
};

/// Synonym Benchmark - compare word-embedding models on a synonym test
#[derive(Parser)]
#[command(name = "synonym-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark across the configured models
    Run {
        /// Path to the benchmark CSV (default from config)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Models to evaluate, comma-separated (default from config)
        #[arg(short, long, value_delimiter = ',')]
        models: Option<Vec<String>>,

        /// Directory for report files (default from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Limit the number of questions (for quick testing)
        #[arg(long)]
        max_questions: Option<usize>,

        /// Also save the full batch result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Download a model from the remote catalog into the local store
    Download {
        /// Model name, e.g. "glove-twitter-25"
        model: String,

        /// Catalog base URL (default from config)
        #[arg(long)]
        catalog: Option<String>,
    },

    /// Show information about a stored model
    Info {
        /// Model name
        model: String,
    },

    /// List models available in the local store
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            dataset,
            models,
            output,
            max_questions,
            json,
        } => cmd_run(dataset, models, output, max_questions, json).await,
        Commands::Download { model, catalog } => cmd_download(model, catalog).await,
        Commands::Info { model } => cmd_info(model),
        Commands::List => cmd_list(),
    }
}

async fn cmd_run(
    dataset_path: Option<PathBuf>,
    models: Option<Vec<String>>,
    output: Option<PathBuf>,
    max_questions: Option<usize>,
    json: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(models) = models {
        config.models = models;
    }
    config.validate().context("Invalid configuration")?;

    let dataset_path = dataset_path.unwrap_or(config.dataset.clone());
    let output_dir = output.unwrap_or(config.output_dir.clone());

    let mut dataset = Dataset::load_csv(&dataset_path).context("Failed to load benchmark")?;
    if let Some(max) = max_questions {
        dataset = dataset.take(max);
    }

    println!("Benchmark: {} ({} questions)", dataset.name, dataset.len());
    println!("Model store: {}", config.store.dir.display());
    println!("Models: {}", config.models.join(", "));
    println!();

    // Ctrl-C aborts the remaining questions of the current model; completed
    // models keep their results.
    let cancel = CancelToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let start = Instant::now();
    let store = ModelStore::new(&config.store.dir);
    let batch = run_batch(&store, &config.models, &dataset, &cancel);

    batch.print_summary();
    println!("Total time: {:.2?}", start.elapsed());

    let writer = ReportWriter::create(&output_dir).context("Failed to prepare output directory")?;
    let written = writer.write_all(&batch).context("Failed to write reports")?;

    println!("\nReports written to {}:", output_dir.display());
    for path in written {
        println!("  {}", path.display());
    }

    if let Some(json_path) = json {
        let content = serde_json::to_string_pretty(&batch)?;
        std::fs::write(&json_path, content)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;
        println!("Batch result saved to {}", json_path.display());
    }

    Ok(())
}

async fn cmd_download(model: String, catalog: Option<String>) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(catalog) = catalog {
        config.store.catalog_base = catalog;
    }
    config
        .validate_for_download()
        .context("Invalid configuration")?;

    let store = ModelStore::new(&config.store.dir);

    println!("Downloading model {model}...");
    println!("Catalog: {}", config.store.catalog_base);

    let path = store
        .download(&model, &config.store.catalog_base)
        .await
        .context("Download failed")?;

    println!("Model saved to {}", path.display());
    Ok(())
}

fn cmd_info(model: String) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let store = ModelStore::new(&config.store.dir);

    let vectors = store
        .load(&model)
        .with_context(|| format!("Failed to load model '{model}'"))?;

    println!("Model Information");
    println!("{}", "─".repeat(40));
    println!("  Name:        {model}");
    println!("  Vocabulary:  {}", vectors.len());
    println!("  Dimension:   {}", vectors.dimension());
    println!("  Store:       {}", store.dir().display());

    Ok(())
}

fn cmd_list() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let store = ModelStore::new(&config.store.dir);

    let models = store.list().context("Failed to read the model store")?;

    if models.is_empty() {
        println!(
            "No models in {}. Use 'download' to fetch one.",
            store.dir().display()
        );
    } else {
        println!("Models in {}:", store.dir().display());
        for name in models {
            println!("  {name}");
        }
    }

    Ok(())
}
