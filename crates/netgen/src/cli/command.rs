use crate::analyzer::NetworkAnalyzer;
use crate::generator::{NetworkGenerator, DEFAULT_ECONOMIC_PCT};
use crate::report::print_analysis;
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use shared::models::NetworkDescriptor;
use shared::Console;
use std::path::PathBuf;

fn parse_fraction(value: &str) -> Result<f64, String> {
    let fraction: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if (0.0..=1.0).contains(&fraction) {
        Ok(fraction)
    } else {
        Err(format!("{fraction} is not within 0.0..=1.0"))
    }
}

#[derive(Parser)]
#[command(author, version, about = "Economic node network utilities for Warnet", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a network configuration
    Generate {
        /// Total number of nodes
        #[arg(long, default_value_t = 30)]
        nodes: usize,

        /// Fraction of economic nodes, between 0 and 1
        #[arg(long, default_value_t = DEFAULT_ECONOMIC_PCT, value_parser = parse_fraction)]
        economic_pct: f64,

        /// Output YAML file
        #[arg(long)]
        output: PathBuf,

        /// Seed for a reproducible topology
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Analyze a network configuration
    Analyze {
        /// Network YAML file to analyze
        #[arg(long)]
        config: PathBuf,

        /// Emit the analysis as JSON instead of a report
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

impl Cli {
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.command {
            Commands::Generate {
                nodes,
                economic_pct,
                output,
                seed,
            } => {
                Console::progress(&format!(
                    "Generating network with {nodes} nodes ({:.0}% Economic)...",
                    economic_pct * 100.0
                ));
                let mut generator = match seed {
                    Some(seed) => NetworkGenerator::with_seed(*nodes, *economic_pct, *seed),
                    None => NetworkGenerator::new(*nodes, *economic_pct),
                };
                let network = generator.generate();

                network
                    .save(output)
                    .with_context(|| format!("failed to write {}", output.display()))?;
                Console::success(&format!(
                    "Network configuration written to {}",
                    output.display()
                ));

                print_analysis(&NetworkAnalyzer::new(&network).analyze());
                Ok(())
            }
            Commands::Analyze { config, json } => {
                info!("Analyzing network configuration: {}", config.display());
                let network = NetworkDescriptor::load(config)
                    .with_context(|| format!("failed to load {}", config.display()))?;
                network
                    .validate()
                    .with_context(|| format!("invalid network in {}", config.display()))?;

                let analysis = NetworkAnalyzer::new(&network).analyze();
                if *json {
                    println!("{}", serde_json::to_string_pretty(&analysis)?);
                } else {
                    Console::progress(&format!(
                        "Analyzing network configuration: {}",
                        config.display()
                    ));
                    print_analysis(&analysis);
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction("0.15"), Ok(0.15));
        assert_eq!(parse_fraction("1"), Ok(1.0));
        assert!(parse_fraction("1.5").is_err());
        assert!(parse_fraction("-0.1").is_err());
        assert!(parse_fraction("many").is_err());
    }

    #[test]
    fn test_generate_then_analyze() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("network.yaml");

        let generate = Cli::parse_from([
            "econ-net",
            "generate",
            "--nodes",
            "20",
            "--seed",
            "7",
            "--output",
            output.to_str().unwrap(),
        ]);
        generate.run().unwrap();

        let network = NetworkDescriptor::load(&output).unwrap();
        assert_eq!(network.nodes.len(), 20);
        assert_eq!(network.economic_nodes().count(), 3);

        let analyze = Cli::parse_from([
            "econ-net",
            "analyze",
            "--config",
            output.to_str().unwrap(),
            "--json",
        ]);
        analyze.run().unwrap();
    }

    #[test]
    fn test_analyze_rejects_dangling_peer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(
            &path,
            "nodes:\n  - name: a\n    connections: [ghost]\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["econ-net", "analyze", "--config", path.to_str().unwrap()]);
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("ghost"));
    }

    #[test]
    fn test_analyze_missing_file_fails() {
        let cli = Cli::parse_from(["econ-net", "analyze", "--config", "/nonexistent/net.yaml"]);
        assert!(cli.run().is_err());
    }
}
