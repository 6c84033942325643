use anyhow::{Context, Result};
use hepta_client::Credentials;
use std::io::Write;

use crate::session_store;

/// Run the interactive login flow: prompt for username and password, trade
/// them for session credentials, store those for later runs.
pub async fn run_login(api_url: &str) -> Result<Credentials> {
    print!("Usuario: ");
    std::io::stdout().flush()?;
    let mut username = String::new();
    std::io::stdin()
        .read_line(&mut username)
        .context("Failed to read username")?;
    let username = username.trim();
    anyhow::ensure!(!username.is_empty(), "Username is required");

    let password =
        rpassword::prompt_password("Contraseña: ").context("Failed to read password")?;

    let credentials = Credentials::login(api_url, username, &password)
        .await
        .context("Login failed. Is the server reachable?")?;

    session_store::save_credentials(&credentials)?;
    println!("Login successful. Session saved.");

    Ok(credentials)
}
