pub mod parse;
pub mod plugins;
pub mod rewrite;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ingestr")]
#[command(about = "Imports pentest tool reports into a host registry.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output, repeat for less (-qq prints only the summary)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Resolve attribute predicates by scanning siblings instead of asking the tree
    #[arg(long, global = true)]
    pub no_native_predicates: bool,

    /// Directory tools are told to write their reports to
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import report files produced by a tool
    #[command(alias = "p")]
    Parse {
        /// Plugin id, e.g. "dnsenum"
        plugin: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Make a tool command write its report where a plugin expects it
    #[command(alias = "r")]
    Rewrite { command: String },
    /// List the available plugins
    #[command(alias = "l")]
    Plugins,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
