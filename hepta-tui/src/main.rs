mod app;
mod backend;
mod bootstrap;
mod cli;
mod commands;
mod config;
mod dev_backend;
mod filter;
mod login;
mod runtime;
mod session_store;
mod suggest;
mod types;
mod ui;

use anyhow::Result;
use app::App;
use backend::Backend;
use clap::Parser;
use cli::{Cli, Commands};
use config::HeptaConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hepta_client::HeptaClient;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG asks for output; stderr keeps the alternate
    // screen clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HeptaConfig::load()?;

    match cli.command {
        Commands::Run => {
            let credentials = match session_store::load_credentials()? {
                Some(credentials) => credentials,
                None => {
                    println!("No hay sesión guardada.");
                    login::run_login(&config.api_url).await?
                }
            };
            let backend = Backend::server(HeptaClient::new(&config.api_url, credentials));
            run_tui(config, backend).await
        }
        Commands::Dev => run_tui(config, Backend::dev()).await,
        Commands::Login => {
            login::run_login(&config.api_url).await?;
            Ok(())
        }
        Commands::Logout => {
            session_store::clear_credentials()?;
            println!("Sesión eliminada.");
            Ok(())
        }
        Commands::ConfigPath => {
            let path = HeptaConfig::config_path()?;
            if !path.exists() {
                HeptaConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_tui(config: HeptaConfig, backend: Backend) -> Result<()> {
    let mut app = App::new(config);
    bootstrap::initialize_app_state(&mut app, &backend).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let res = runtime::run_app(&mut terminal, &mut app, &backend).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
