//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Index flat parent-linked records into a navigable tree
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Show author and version information
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the hierarchy as a tree
    Tree {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// Print the original records verbatim
    All {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },

    /// Look up a single record by id
    Get {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
        /// Record id (integer or string)
        id: String,
    },

    /// List direct children of a record
    Children {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
        /// Record id (integer or string)
        id: String,
    },

    /// List all descendants of a record, level by level
    Descendants {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
        /// Record id (integer or string)
        id: String,
    },

    /// Show the ancestor chain from a record up to the root
    Parents {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
        /// Record id (integer or string)
        id: String,
    },

    /// List top-level root records
    Roots {
        /// JSON file with the record collection
        #[arg(value_hint = ValueHint::FilePath)]
        source_path: PathBuf,
    },
}
