mod auth;
mod client;
pub mod domain;
mod hepta_url;

pub use hepta_url::HeptaUrl;

pub use auth::*;
pub use client::*;
