//! Fiber Friends CLI
//!
//! Command-line interface for analyzing exported symptom logs:
//! - Full pattern reports (locally or via the API server)
//! - Correlation between two symptoms
//! - Cycles, trends and triggers on their own
//! - Server status and config generation

use clap::{Parser, Subcommand};
use fiberfriends::analytics::{
    compute_correlation, correlation::aligned_pair_count, detect_cyclical_patterns,
    detect_trends, filter_symptom, identify_triggers, CorrelationStrength, CyclicalPattern,
    ObservationRecord, PatternReport, SymptomAnalytics, SymptomObservation, TrendResult,
    TriggerFinding,
};
use fiberfriends::config::{Config, LoggingConfig};
use fiberfriends::import::load_observations;
use fiberfriends::logging::init_cli_logging;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fiberfriends")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find patterns in your symptom log")]
#[command(long_about = "Fiber Friends analyzes daily symptom logs.\nDiscover cycles, trends, triggers and symptoms that flare up together.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every analysis and print the full report
    Analyze {
        /// Symptom log (.csv or .json)
        file: PathBuf,
        /// Run the analysis on the API server instead of locally
        #[arg(long)]
        remote: bool,
    },

    /// Correlate two symptoms from the same log
    Correlate {
        /// Symptom log (.csv or .json)
        file: PathBuf,
        /// First symptom name
        symptom_a: String,
        /// Second symptom name
        symptom_b: String,
    },

    /// Detect weekly and monthly cycles
    Patterns {
        /// Symptom log (.csv or .json)
        file: PathBuf,
        /// Only analyze this symptom
        #[arg(short, long)]
        symptom: Option<String>,
    },

    /// Detect the severity trend
    Trends {
        /// Symptom log (.csv or .json)
        file: PathBuf,
        /// Only analyze this symptom
        #[arg(short, long)]
        symptom: Option<String>,
    },

    /// Find context factors associated with worse or milder symptoms
    Triggers {
        /// Symptom log (.csv or .json)
        file: PathBuf,
    },

    /// Show API server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CorrelationOutput<'a> {
    symptom_a: &'a str,
    symptom_b: &'a str,
    coefficient: f64,
    pairs_considered: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref())?;
    init_cli_logging(&cli_logging(&config.logging, cli.verbose))?;

    let json = match cli.format.as_str() {
        "json" => true,
        "table" => false,
        other => {
            eprintln!("Unknown output format: {} (expected table or json)", other);
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::Analyze { file, remote } => {
            let observations = load_or_exit(&file);

            let report = if remote {
                analyze_remote(&cli.api_url, &observations).await?
            } else {
                SymptomAnalytics::new(config.insights.clone()).analyze(&observations)
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Correlate {
            file,
            symptom_a,
            symptom_b,
        } => {
            let observations = load_or_exit(&file);
            let series_a = filter_symptom(&observations, &symptom_a);
            let series_b = filter_symptom(&observations, &symptom_b);

            for (name, series) in [(&symptom_a, &series_a), (&symptom_b, &series_b)] {
                if series.is_empty() {
                    eprintln!("No observations of '{}' in {:?}", name, file);
                    std::process::exit(1);
                }
            }

            let output = CorrelationOutput {
                symptom_a: &symptom_a,
                symptom_b: &symptom_b,
                coefficient: compute_correlation(&series_a, &series_b),
                pairs_considered: aligned_pair_count(&series_a, &series_b),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{} ~ {}: r = {:.2} ({}, {} aligned pairs)",
                    output.symptom_a,
                    output.symptom_b,
                    output.coefficient,
                    CorrelationStrength::from_coefficient(output.coefficient).as_str(),
                    output.pairs_considered
                );
            }
        }

        Commands::Patterns { file, symptom } => {
            let observations = select(load_or_exit(&file), symptom.as_deref());
            let patterns = detect_cyclical_patterns(&observations);

            if json {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else {
                print_patterns(&patterns);
            }
        }

        Commands::Trends { file, symptom } => {
            let observations = select(load_or_exit(&file), symptom.as_deref());
            let trends = detect_trends(&observations);

            if json {
                println!("{}", serde_json::to_string_pretty(&trends)?);
            } else {
                print_trends(&trends);
            }
        }

        Commands::Triggers { file } => {
            let observations = load_or_exit(&file);
            let triggers = identify_triggers(&observations);

            if json {
                println!("{}", serde_json::to_string_pretty(&triggers)?);
            } else {
                print_triggers(&triggers);
            }
        }

        Commands::Status => {
            let client = reqwest::Client::new();
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if json {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!("Fiber Friends v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "API Version: {}",
                        health["version"].as_str().unwrap_or("unknown")
                    );

                    if let Some(thresholds) = health.get("thresholds") {
                        println!();
                        println!("Insight thresholds:");
                        println!("  Pattern confidence: {}%", thresholds["pattern_confidence"]);
                        println!("  Trend confidence:   {}%", thresholds["trend_confidence"]);
                        println!("  Max triggers:       {}", thresholds["max_triggers"]);
                        println!("  Correlation:        {}", thresholds["correlation_strength"]);
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Fiber Friends API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin fiberfriends-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = fiberfriends::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Logging settings from config, with `--verbose` forcing debug
fn cli_logging(config: &LoggingConfig, verbose: bool) -> LoggingConfig {
    let mut logging = config.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}

/// Load a symptom log, exiting with a message on failure
fn load_or_exit(path: &Path) -> Vec<SymptomObservation> {
    if !path.exists() {
        eprintln!("File not found: {:?}", path);
        std::process::exit(1);
    }

    match load_observations(path) {
        Ok(observations) => observations,
        Err(e) => {
            eprintln!("Failed to load {:?}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn select(observations: Vec<SymptomObservation>, symptom: Option<&str>) -> Vec<SymptomObservation> {
    match symptom {
        Some(name) => filter_symptom(&observations, name),
        None => observations,
    }
}

async fn analyze_remote(
    api_url: &str,
    observations: &[SymptomObservation],
) -> Result<PatternReport, Box<dyn std::error::Error>> {
    let records: Vec<ObservationRecord> = observations.iter().map(ObservationRecord::from).collect();
    let body = serde_json::json!({ "observations": records });

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/analyze", api_url))
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(format!("Analysis failed ({}): {}", status, text).into());
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_report(report: &PatternReport) {
    println!("Observations: {}", report.observation_count);

    if !report.symptoms.is_empty() {
        println!();
        println!("{:<20} {:>6} {:>8} {:<10}", "Symptom", "Count", "Mean", "Trend");
        println!("{}", "-".repeat(48));
        for summary in &report.symptoms {
            println!(
                "{:<20} {:>6} {:>8.1} {:<10}",
                summary.symptom_name,
                summary.observation_count,
                summary.mean_severity,
                summary
                    .trend
                    .as_ref()
                    .map(|t| t.direction.as_str())
                    .unwrap_or("-")
            );
        }
    }

    println!();
    print_patterns(&report.patterns);
    println!();
    print_trends(&report.trends);
    println!();
    print_triggers(&report.triggers);

    if !report.correlations.is_empty() {
        println!();
        println!("{:<20} {:<20} {:>7} {:<10}", "Symptom A", "Symptom B", "r", "Strength");
        println!("{}", "-".repeat(60));
        for corr in &report.correlations {
            println!(
                "{:<20} {:<20} {:>7.2} {:<10}",
                corr.symptom_a,
                corr.symptom_b,
                corr.coefficient,
                corr.strength.as_str()
            );
        }
    }

    if !report.insights.is_empty() {
        println!();
        println!("Insights:");
        for insight in &report.insights {
            println!("  - {}", insight);
        }
    }
}

fn print_patterns(patterns: &[CyclicalPattern]) {
    if patterns.is_empty() {
        println!("No cyclical patterns found (needs at least 14 observations).");
        return;
    }

    println!("{:<10} {:>11}  {}", "Period", "Confidence", "Description");
    println!("{}", "-".repeat(60));
    for pattern in patterns {
        println!(
            "{:<10} {:>10.0}%  {}",
            format!("{} days", pattern.period_days),
            pattern.confidence_percent,
            pattern.description
        );
    }
}

fn print_trends(trends: &[TrendResult]) {
    if trends.is_empty() {
        println!("No trend found (needs at least 7 observations).");
        return;
    }

    println!("{:<10} {:>11} {:>8}  {}", "Direction", "Confidence", "Slope", "Description");
    println!("{}", "-".repeat(60));
    for trend in trends {
        println!(
            "{:<10} {:>10.0}% {:>8.2}  {}",
            trend.direction.as_str(),
            trend.confidence_percent,
            trend.slope_per_window,
            trend.description
        );
    }
}

fn print_triggers(triggers: &[TriggerFinding]) {
    if triggers.is_empty() {
        println!("No triggers found.");
        return;
    }

    println!("{:<20} {:>7} {:>6}  {}", "Factor", "Score", "Seen", "Description");
    println!("{}", "-".repeat(60));
    for trigger in triggers {
        println!(
            "{:<20} {:>7.2} {:>6}  {}",
            trigger.trigger, trigger.correlation, trigger.occurrences, trigger.description
        );
    }
}
