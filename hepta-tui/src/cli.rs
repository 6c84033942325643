use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hepta-tui")]
#[command(about = "Terminal UI for the Hepta-Conexiones workflow server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real Hepta-Conexiones server
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Authenticate with username and password
    Login,
    /// Remove the stored session credentials
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
