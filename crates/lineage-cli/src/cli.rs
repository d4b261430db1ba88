use clap::{Parser, Subcommand, ValueEnum};

use crate::support::DEFAULT_TREE_PATH;

#[derive(Parser)]
#[command(
    name = "lineage",
    about = "Lineage: descendant numbering (d'Aboville, Henry, NGSQ) for family trees",
    version
)]
pub struct Cli {
    /// Log traversal decisions to stderr (overrides LINEAGE_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available numbering styles and their parameters
    Styles {
        /// Style manifest (TOML) that selects and configures the catalog
        #[arg(long)]
        styles: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Number the descendants of one ancestor
    Number {
        /// Ancestor individual ID
        ancestor: String,

        /// Numbering style ID (see `lineage styles`)
        #[arg(long)]
        style: String,

        /// Style parameter, repeatable; repeating a key builds a list
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Path to the tree JSONL
        #[arg(long, default_value = DEFAULT_TREE_PATH)]
        tree: String,

        /// Style manifest (TOML) that selects and configures the catalog
        #[arg(long)]
        styles: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Omit the header row of csv output
        #[arg(long)]
        no_header: bool,

        /// Field delimiter of csv output
        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[value(name = "table")]
    Table,
    #[value(name = "json")]
    Json,
    #[value(name = "csv")]
    Csv,
}
