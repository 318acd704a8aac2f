use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "amm")]
#[command(about = "Estimate what it costs to send content to API models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model reference table (overrides the config file)
    #[arg(long, global = true)]
    pub reference: Option<PathBuf>,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the models in the reference table
    Models {
        #[arg(long, value_parser = ["company", "model", "max-tokens"], default_value = "company")]
        sort: String,

        #[arg(long, value_parser = ["plain", "json"], default_value = "plain")]
        format: String,
    },

    /// Show how a file would be classified
    Classify { path: PathBuf },

    /// Estimate cost and tokens for the selected models
    Assess {
        #[command(flatten)]
        input: InputArgs,

        /// Assess against every model in the table
        #[arg(long, conflicts_with = "model")]
        all: bool,

        /// Company or model name to select (repeatable, substring match)
        #[arg(long, short = 'm')]
        model: Vec<String>,

        #[arg(long, value_parser = ["company", "model", "max-tokens"], default_value = "company")]
        sort: String,

        /// Write results to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,

        #[arg(long, value_parser = ["plain", "json"], default_value = "plain")]
        format: String,
    },

    /// Count words and characters of text
    Stats {
        #[arg(long, conflicts_with = "stdin")]
        text: Option<String>,

        #[arg(long)]
        stdin: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// File to assess
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Text to assess
    #[arg(long)]
    pub text: Option<String>,

    /// Read text to assess from standard input
    #[arg(long)]
    pub stdin: bool,
}
