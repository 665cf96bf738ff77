use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use colloquy::{
    AnalysisReport, AnnotationStore, HumanSummary, SentimentConfig, Stage3Config, Vocabulary,
    analyze_transcript, build_sentiment_annotator, execute_stage3, load_vocabulary,
    read_transcript_file, run_pipeline,
};

#[derive(Parser)]
#[command(name = "colloquy")]
#[command(author, version, about = "Interview transcript analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify each transcript line and extract subject, object and sentiment
    Process {
        /// Transcript file, one "Speaker: utterance" per line
        #[arg(short, long)]
        input: PathBuf,

        /// Pre-computed annotations (JSON array or JSON lines)
        #[arg(short, long)]
        annotations: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for the CSV export
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Output file for the human-readable summary
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Vocabulary override (JSON)
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Only include this actor or speaker label in the summary
        #[arg(long)]
        actor: Option<String>,

        /// Skip the sentiment oracles
        #[arg(long)]
        skip_sentiment: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the summary of a previously written JSON report
    Show {
        /// JSON report written by `process`
        #[arg(short, long)]
        report: PathBuf,

        /// Only include this actor or speaker label
        #[arg(long)]
        actor: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            annotations,
            output,
            csv,
            human_readable,
            vocabulary,
            actor,
            skip_sentiment,
            verbose,
        } => {
            setup_logging(verbose);
            process_transcript(ProcessArgs {
                input,
                annotations,
                output,
                csv,
                human_readable,
                vocabulary,
                actor,
                skip_sentiment,
            })
            .await
        }
        Commands::Show {
            report,
            actor,
            verbose,
        } => {
            setup_logging(verbose);
            show_report(report, actor)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

struct ProcessArgs {
    input: PathBuf,
    annotations: PathBuf,
    output: PathBuf,
    csv: Option<PathBuf>,
    human_readable: Option<PathBuf>,
    vocabulary: Option<PathBuf>,
    actor: Option<String>,
    skip_sentiment: bool,
}

async fn process_transcript(args: ProcessArgs) -> Result<()> {
    info!("Loading transcript from {:?}", args.input);
    let transcript = read_transcript_file(&args.input)?;

    let store = AnnotationStore::from_file(&args.annotations)
        .context("Failed to load annotations")?;
    info!("Loaded {} annotated utterances", store.len());

    let vocabulary = match &args.vocabulary {
        Some(path) => load_vocabulary(path)?,
        None => Vocabulary::default(),
    };

    let report = if args.skip_sentiment {
        info!("Skipping sentiment (--skip-sentiment)");
        run_pipeline(&transcript, &store, &vocabulary)?
    } else {
        let config = SentimentConfig::from_env()?;
        let annotator = build_sentiment_annotator(&config);
        analyze_transcript(&transcript, &store, &vocabulary, &annotator).await?
    };

    let stage3_config = Stage3Config {
        actor_filter: args.actor,
        ..Default::default()
    };
    let rendered = execute_stage3(
        &report,
        Some(args.output.as_path()),
        args.csv.as_deref(),
        args.human_readable.as_deref(),
        &stage3_config,
    )
    .await?;

    info!("Report written to {:?}", rendered.json_path);
    if let Some(path) = rendered.csv_path {
        info!("CSV written to {:?}", path);
    }
    if let Some(path) = rendered.human_path {
        info!("Summary written to {:?}", path);
    }

    info!(
        "Complete: {} records, {} failed lines, {} with sentiment",
        report.metadata.records, report.metadata.failures, report.metadata.sentiment_scored
    );

    Ok(())
}

fn show_report(path: PathBuf, actor: Option<String>) -> Result<()> {
    info!("Loading report from {:?}", path);
    let report = AnalysisReport::from_file(&path)?;

    let summary = match &actor {
        Some(actor) => HumanSummary::with_actor_filter(&report, actor),
        None => HumanSummary::new(&report),
    };
    print!("{}", summary.format());

    Ok(())
}
