use clap::{Parser, Subcommand};

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "backup-retention")]
#[command(about = "Selects the newest backup files of every series", long_about = None)]
pub struct Cli {
    /// JSON backup list, overrides the `config_file` setting
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Newest files to keep per series and suffix, overrides `keep_last`
    #[arg(short, long, global = true)]
    pub keep: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show retained, deletable and uncovered files of every configured path
    Plan,
    /// List files no configuration line governs
    Uncovered,
    /// Print the configuration line governing a filename
    Lookup {
        /// Bare filename, without directory
        filename: String,
    },
    /// Print configuration values
    PrintConfig,
}
