//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Hierarchical navigation menu toolkit: tree assembly, CSV import/export, pluggable node types
#[derive(Parser, Debug)]
#[command(name = "menutree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug output (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Catalog file (default: from config or ./menutree.json)
    #[arg(long, global = true, env = "MENUTREE_CATALOG")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a menu to a CSV exchange file
    Export {
        /// Menu identifier
        identifier: String,
        /// Target directory (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Import a menu from a CSV exchange file
    Import {
        /// Exchange file
        file: PathBuf,
    },

    /// Show a menu's node hierarchy as a tree
    Tree {
        /// Menu identifier
        identifier: String,
    },

    /// Show node data resolved per node type for one store scope
    Show {
        /// Menu identifier
        identifier: String,
        /// Store scope ("0" is the all-stores scope)
        #[arg(short, long, default_value = "0")]
        store: String,
    },

    /// List menus in the catalog
    List,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
