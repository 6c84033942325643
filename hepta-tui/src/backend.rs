use hepta_client::domain::{
    CatalogStructure, ConnectionDetail, ConnectionRequest, ConnectionStatus, DashboardData,
    DashboardPreferences, ProfileSuggestion, StatusChange,
};
use hepta_client::{ClientError, HeptaClient};

use crate::dev_backend::DevBackend;

/// Dev-mode lookups answer from memory; a small delay keeps the suggestion
/// flow (spinner, cancellation) observable.
const DEV_LOOKUP_DELAY_MS: u64 = 150;

/// Transport behind every data access: the real server, or the seeded
/// in-memory store in dev mode.
#[derive(Debug, Clone)]
pub enum Backend {
    Server(Box<HeptaClient>),
    Dev(DevBackend),
}

impl Backend {
    pub fn server(client: HeptaClient) -> Self {
        Backend::Server(Box::new(client))
    }

    pub fn dev() -> Self {
        Backend::Dev(DevBackend::new())
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardData, ClientError> {
        match self {
            Backend::Server(client) => client.fetch_dashboard().await,
            Backend::Dev(dev) => Ok(dev.dashboard()),
        }
    }

    pub async fn fetch_catalog(&self) -> Result<CatalogStructure, ClientError> {
        match self {
            Backend::Server(client) => client.fetch_catalog().await,
            Backend::Dev(dev) => Ok(dev.catalog()),
        }
    }

    pub async fn search_profiles(&self, query: &str) -> Result<Vec<ProfileSuggestion>, ClientError> {
        match self {
            Backend::Server(client) => client.search_profiles(query).await,
            Backend::Dev(dev) => {
                tokio::time::sleep(std::time::Duration::from_millis(DEV_LOOKUP_DELAY_MS)).await;
                Ok(dev.search_profiles(query))
            }
        }
    }

    pub async fn change_status(
        &self,
        conexion_id: i64,
        change: &StatusChange,
    ) -> Result<String, ClientError> {
        match self {
            Backend::Server(client) => client.change_status(conexion_id, change).await,
            Backend::Dev(dev) => dev.change_status(conexion_id, change),
        }
    }

    pub async fn create_connection(
        &self,
        request: &ConnectionRequest,
    ) -> Result<String, ClientError> {
        match self {
            Backend::Server(client) => client.create_connection(request).await,
            Backend::Dev(dev) => dev.create_connection(request),
        }
    }

    pub async fn project_details(
        &self,
        proyecto_id: &str,
        estado: ConnectionStatus,
    ) -> Result<Vec<ConnectionDetail>, ClientError> {
        match self {
            Backend::Server(client) => client.project_details(proyecto_id, estado).await,
            Backend::Dev(dev) => Ok(dev.project_details(proyecto_id, estado)),
        }
    }

    pub async fn set_theme(&self, theme: &str) -> Result<(), ClientError> {
        match self {
            Backend::Server(client) => client.set_theme(theme).await,
            Backend::Dev(_) => Ok(()),
        }
    }

    pub async fn mark_notifications_read(&self) -> Result<(), ClientError> {
        match self {
            Backend::Server(client) => client.mark_notifications_read().await,
            Backend::Dev(dev) => {
                dev.mark_notifications_read();
                Ok(())
            }
        }
    }

    pub async fn save_preferences(
        &self,
        prefs: &DashboardPreferences,
    ) -> Result<String, ClientError> {
        match self {
            Backend::Server(client) => client.save_preferences(prefs).await,
            Backend::Dev(dev) => Ok(dev.save_preferences(prefs)),
        }
    }
}
