//! @ai:module:intent CLI for environmental report generation
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use envreport::{
    catalog::{Category, MetricCatalog},
    delivery::{mailto_link, DeliveryClientTrait, WebhookClient, WebhookPayload},
    input::{RawValue, ReportRequest},
    output::{format_catalog, format_evaluation, format_report_summary, OutputFormat},
    report::{report_file_name, AssembledReport, GeneratedFiles},
    PlottersChartRenderer, ReportAssembler, ReportConfig, ReportGenerator, RiskEvaluator,
    RiskEvaluatorTrait,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use walkdir::WalkDir;

const DEFAULT_CONFIG: &str = "envreport.toml";

#[derive(Parser)]
#[command(name = "envreport")]
#[command(about = "Classify environmental measurements and compose paginated reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a report from one measurement file
    Generate {
        /// Measurement request (.toml or .json)
        input: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to output.dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Deliver the report to this address through the configured webhook
        #[arg(long)]
        send: Option<String>,

        /// Print a mailto: link addressed to the client
        #[arg(long)]
        mailto: bool,
    },

    /// Generate reports for every measurement file under a directory
    Batch {
        /// Directory to search for .toml and .json requests
        dir: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (defaults to output.dir from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum reports generated at once
        #[arg(short, long, default_value = "4")]
        jobs: usize,
    },

    /// Classify a single measurement
    Evaluate {
        /// Metric key, e.g. carbonDioxide
        key: String,

        /// Measured value
        value: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the metric catalog
    Catalog {
        /// Only show one category (air, water, surface, dust)
        #[arg(long)]
        category: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("envreport=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            config,
            output,
            send,
            mailto,
        } => generate(input, config, output, send, mailto).await,
        Commands::Batch {
            dir,
            config,
            output,
            jobs,
        } => batch(dir, config, output, jobs).await,
        Commands::Evaluate { key, value, format } => evaluate(&key, &value, format),
        Commands::Catalog { category, format } => list_catalog(category, format),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Assemble one request and write its files
/// @ai:effects cpu, fs:write
async fn build_report(
    config: &ReportConfig,
    request: &ReportRequest,
    output_dir: &Path,
) -> Result<(AssembledReport, GeneratedFiles)> {
    let assembler = ReportAssembler::new(PlottersChartRenderer::from_config(&config.chart), config);
    let report = assembler.assemble(request).await;
    let files = ReportGenerator::new(config).generate_all(&report, output_dir)?;
    Ok((report, files))
}

/// @ai:intent Generate a single report, then optionally deliver it
/// @ai:effects fs:read, fs:write, network
async fn generate(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    send: Option<String>,
    mailto: bool,
) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let request = ReportRequest::load(&input)
        .with_context(|| format!("Failed to load request {}", input.display()))?;
    let output_dir = output.unwrap_or_else(|| config.output.dir.clone());

    tracing::info!("Generating report for {}", input.display());
    let (report, files) = build_report(&config, &request, &output_dir).await?;

    print!(
        "{}",
        format_report_summary(&report.analysis, &files, report.document.page_count())
    );

    let analysis = &report.analysis;
    let file_name = report_file_name(&analysis.client.name, analysis.report_date, "md");

    if let Some(email) = send {
        let markdown = std::fs::read_to_string(&files.markdown)?;
        let payload =
            WebhookPayload::for_report(&email, &config.delivery, analysis, &file_name, markdown)?;
        let client = WebhookClient::from_config(&config.delivery)?;
        client
            .deliver(&payload)
            .await
            .with_context(|| format!("Failed to deliver report to {}", email))?;
        println!("Report sent to {}", email);
    }

    if mailto {
        let email = analysis.client.email.trim();
        if email.is_empty() {
            anyhow::bail!("Client has no email address for a mailto: link");
        }
        let body = format!(
            "Hello {},\n\n{}\n\nAttachment: {}",
            analysis.client.name, config.delivery.message, file_name
        );
        println!("{}", mailto_link(email, &config.delivery.subject, &body)?);
    }

    Ok(())
}

/// @ai:intent Collect request files under a directory in a stable order
/// @ai:effects fs:read
fn discover_requests(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| ReportRequest::is_request_file(p))
        .collect();
    paths.sort();
    paths
}

/// @ai:intent Generate reports for every request under a directory in parallel
/// @ai:effects fs:read, fs:write
async fn batch(
    dir: PathBuf,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    jobs: usize,
) -> Result<()> {
    let config = Arc::new(load_or_default_config(config_path)?);
    let output_dir = Arc::new(output.unwrap_or_else(|| config.output.dir.clone()));
    let requests = discover_requests(&dir);

    if requests.is_empty() {
        tracing::warn!("No request files found under {}", dir.display());
        return Ok(());
    }

    tracing::info!("Found {} requests", requests.len());

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let mut set = tokio::task::JoinSet::new();

    for path in requests {
        let config = Arc::clone(&config);
        let output_dir = Arc::clone(&output_dir);
        let semaphore = Arc::clone(&semaphore);

        set.spawn(async move {
            let result: Result<(AssembledReport, GeneratedFiles)> = async {
                let _permit = semaphore.acquire_owned().await?;
                let request = ReportRequest::load(&path)?;
                build_report(&config, &request, &output_dir).await
            }
            .await;
            (path, result)
        });
    }

    let mut generated = 0;
    let mut failed = 0;

    while let Some(joined) = set.join_next().await {
        let (path, result) = joined?;
        match result {
            Ok((report, files)) => {
                generated += 1;
                tracing::info!(
                    "{} -> {} ({} pages)",
                    path.display(),
                    files.markdown.display(),
                    report.document.page_count()
                );
            }
            Err(e) => {
                failed += 1;
                tracing::error!("Failed to generate report for {}: {:#}", path.display(), e);
            }
        }
    }

    println!("Generated {} reports in {}", generated, output_dir.display());

    if failed > 0 {
        anyhow::bail!("{} of {} reports failed", failed, generated + failed);
    }

    Ok(())
}

/// @ai:intent Classify one value and print the result
/// @ai:effects pure
fn evaluate(key: &str, value: &str, format: OutputFormat) -> Result<()> {
    let evaluator = RiskEvaluator::new();
    let result = evaluator.evaluate(key, &RawValue::from(value))?;
    let metric = evaluator
        .catalog()
        .get(key)
        .with_context(|| format!("Unknown metric: {}", key))?;

    print!("{}", format_evaluation(metric, &result, format));
    if format != OutputFormat::Text {
        println!();
    }
    Ok(())
}

/// @ai:intent Print the metric catalog
/// @ai:effects pure
fn list_catalog(category: Option<String>, format: OutputFormat) -> Result<()> {
    let category = category.map(|c| parse_category(&c)).transpose()?;
    let catalog = MetricCatalog::builtin();

    print!("{}", format_catalog(catalog, category, format));
    if format != OutputFormat::Text {
        println!();
    }
    Ok(())
}

fn parse_category(name: &str) -> Result<Category> {
    Category::ALL
        .into_iter()
        .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
        .with_context(|| format!("Unknown category: {} (expected air, water, surface or dust)", name))
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = ReportConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<ReportConfig> {
    let config = match path {
        Some(p) => ReportConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display()))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG);

            if default_path.exists() {
                ReportConfig::load(&default_path)?
            } else {
                ReportConfig::default()
            }
        }
    };

    for issue in config.issues() {
        tracing::warn!("Config: {}", issue);
    }

    Ok(config)
}
