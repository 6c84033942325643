use anyhow::{Context, Result};
use hepta_client::Credentials;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("hepta-tui"))
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn credentials_path() -> Result<PathBuf> {
    Ok(root_path()?.join("credentials"))
}

/// Load saved credentials. Returns None when not logged in.
pub fn load_credentials() -> Result<Option<Credentials>> {
    let path = credentials_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(&path).context("Failed to read credentials file")?;
    let mut session_id = None;
    let mut csrf_token = None;
    for line in raw.lines() {
        let mut parts = line.splitn(2, '=');
        match (parts.next().map(str::trim), parts.next().map(str::trim)) {
            (Some("session"), Some(value)) if !value.is_empty() => {
                session_id = Some(value.to_string());
            }
            (Some("csrf_token"), Some(value)) if !value.is_empty() => {
                csrf_token = Some(value.to_string());
            }
            _ => {}
        }
    }

    match (session_id, csrf_token) {
        (Some(session_id), Some(csrf_token)) => {
            Ok(Some(Credentials::new(session_id, csrf_token)))
        }
        _ => Ok(None),
    }
}

pub fn save_credentials(credentials: &Credentials) -> Result<()> {
    let path = credentials_path()?;
    let content = format!(
        "session={}\ncsrf_token={}",
        credentials.session_id, credentials.csrf_token
    );
    secure_write(path.as_path(), &content)
}

pub fn clear_credentials() -> Result<()> {
    let path = credentials_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
