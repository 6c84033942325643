use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    CatalogStructure, ConnectionDetail, ConnectionRequest, ConnectionStatus, DashboardData,
    DashboardPreferences, ProfileSuggestion, StatusChange, Tipologia,
};
use crate::{Credentials, HeptaUrl};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Form field names for the profile inputs of the request form, in order.
/// No tipología in the catalog takes more profiles than this.
const PROFILE_FIELDS: [&str; 6] = [
    "perfil_1", "perfil_2", "perfil_3", "perfil_4", "perfil_5", "perfil_6",
];

#[derive(Debug, Clone)]
pub struct HeptaClient {
    http: Client,
    base_url: HeptaUrl,
    credentials: Credentials,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Cancelled")]
    Cancelled,
    #[error("NetworkFailure: {0}")]
    Network(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("{message}")]
    Rejected { message: String },
    #[error("CSRF token is missing; cannot perform state-changing request")]
    MissingCsrfToken,
}

impl ClientError {
    /// Superseded lookups are expected and must stay silent at call sites.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

/// Generic `{success, message}` envelope returned by state-changing
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct ServerAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ServerAck {
    fn into_result(self) -> Result<String, ClientError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ClientError::Rejected {
                message: self.message,
            })
        }
    }
}

#[derive(Serialize)]
struct SetThemeRequest<'a> {
    theme: &'a str,
}

impl HeptaClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            base_url: HeptaUrl::new(base_url),
            credentials,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let resp = request
            .header("Cookie", self.credentials.as_cookie_header())
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if matches!(
            resp.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(ClientError::Unauthorized);
        }

        if !resp.status().is_success() {
            // Error bodies still carry the envelope when the server produced
            // them; fall back to the bare status line otherwise.
            let status = resp.status();
            let message = match resp.json::<ServerAck>().await {
                Ok(ack) if !ack.message.is_empty() => ack.message,
                _ => format!("Server returned {}", status),
            };
            warn!(%status, %message, "request rejected");
            return Err(ClientError::Rejected { message });
        }

        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: HeptaUrl) -> Result<T, ClientError> {
        debug!(url = url.as_ref(), "GET");
        let resp = self.send(self.http.get(url.as_ref())).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Parsing(format!("Failed to parse response as JSON: {}", e)))
    }

    /// POST a JSON body with the CSRF header, parse the ack envelope.
    async fn post_json<B: Serialize>(
        &self,
        url: HeptaUrl,
        body: &B,
    ) -> Result<String, ClientError> {
        let token = self.csrf_token()?;
        debug!(url = url.as_ref(), "POST json");
        let resp = self
            .send(
                self.http
                    .post(url.as_ref())
                    .header(CSRF_HEADER, token)
                    .json(body),
            )
            .await?;
        let ack = resp
            .json::<ServerAck>()
            .await
            .map_err(|e| ClientError::Parsing(format!("Malformed ack envelope: {}", e)))?;
        ack.into_result()
    }

    /// POST a form body; the CSRF token travels both as a header and as the
    /// `csrf_token` field the server-side form validation expects.
    async fn post_form(
        &self,
        url: HeptaUrl,
        mut form: Vec<(&'static str, String)>,
    ) -> Result<String, ClientError> {
        let token = self.csrf_token()?.to_string();
        form.push(("csrf_token", token.clone()));
        debug!(url = url.as_ref(), "POST form");
        let resp = self
            .send(
                self.http
                    .post(url.as_ref())
                    .header(CSRF_HEADER, token)
                    .form(&form),
            )
            .await?;
        let ack = resp
            .json::<ServerAck>()
            .await
            .map_err(|e| ClientError::Parsing(format!("Malformed ack envelope: {}", e)))?;
        ack.into_result()
    }

    fn csrf_token(&self) -> Result<&str, ClientError> {
        if self.credentials.csrf_token.is_empty() {
            warn!("state-changing request aborted: no CSRF token");
            return Err(ClientError::MissingCsrfToken);
        }
        Ok(&self.credentials.csrf_token)
    }

    /// Profile autocomplete lookup. The caller owns cancellation; a lookup
    /// superseded mid-flight never reaches interpretation because its task
    /// is aborted at the await point.
    pub async fn search_profiles(
        &self,
        query: &str,
    ) -> Result<Vec<ProfileSuggestion>, ClientError> {
        let url = self
            .base_url
            .append_path("/api/perfiles/buscar")
            .with_param("q", query);
        self.fetch(url).await
    }

    /// Tipologías for a (tipo, subtipo) pair. The server fails soft here and
    /// returns an empty list for unknown pairs.
    pub async fn fetch_tipologias(
        &self,
        tipo: &str,
        subtipo: &str,
    ) -> Result<Vec<Tipologia>, ClientError> {
        let url = self
            .base_url
            .append_path("/api/tipologias")
            .with_param("tipo", tipo)
            .with_param("subtipo", subtipo);
        self.fetch(url).await
    }

    pub async fn fetch_catalog(&self) -> Result<CatalogStructure, ClientError> {
        let url = self.base_url.append_path("/api/catalogo/estructura");
        self.fetch(url).await
    }

    pub async fn fetch_dashboard(&self) -> Result<DashboardData, ClientError> {
        let url = self.base_url.append_path("/api/dashboard/data");
        self.fetch(url).await
    }

    pub async fn project_details(
        &self,
        proyecto_id: &str,
        estado: ConnectionStatus,
    ) -> Result<Vec<ConnectionDetail>, ClientError> {
        let url = self
            .base_url
            .append_path("/api/dashboard/project-details")
            .with_param("proyecto_id", proyecto_id)
            .with_param("estado", estado.as_str());
        self.fetch(url).await
    }

    /// Apply a status transition to a connection. Returns the server's
    /// user-facing message on success.
    pub async fn change_status(
        &self,
        conexion_id: i64,
        change: &StatusChange,
    ) -> Result<String, ClientError> {
        let url = self
            .base_url
            .append_path(&format!("/conexiones/{}/cambiar_estado", conexion_id));
        let mut form = vec![("estado", change.estado.as_str().to_string())];
        if let Some(detalles) = &change.detalles {
            form.push(("detalles", detalles.clone()));
        }
        self.post_form(url, form).await
    }

    /// File a new connection request. Returns the server's confirmation
    /// message (which carries the generated connection code).
    pub async fn create_connection(
        &self,
        request: &ConnectionRequest,
    ) -> Result<String, ClientError> {
        let url = self.base_url.append_path("/conexiones/crear");
        let mut form = vec![
            ("proyecto_id", request.proyecto_id.clone()),
            ("tipo", request.tipo.clone()),
            ("subtipo", request.subtipo.clone()),
            ("tipologia_nombre", request.tipologia_nombre.clone()),
            ("descripcion", request.descripcion.clone()),
        ];
        for (field, perfil) in PROFILE_FIELDS.into_iter().zip(&request.perfiles) {
            form.push((field, perfil.clone()));
        }
        self.post_form(url, form).await
    }

    /// Persist the UI theme preference ("light" or "dark").
    pub async fn set_theme(&self, theme: &str) -> Result<(), ClientError> {
        let url = self.base_url.append_path("/api/set-theme");
        self.post_json(url, &SetThemeRequest { theme }).await?;
        Ok(())
    }

    pub async fn mark_notifications_read(&self) -> Result<(), ClientError> {
        let url = self
            .base_url
            .append_path("/api/notificaciones/marcar-leidas");
        self.post_json(url, &serde_json::json!({})).await?;
        Ok(())
    }

    pub async fn save_preferences(
        &self,
        prefs: &DashboardPreferences,
    ) -> Result<String, ClientError> {
        let url = self.base_url.append_path("/api/dashboard/save_preferences");
        self.post_json(url, prefs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_envelope_success_yields_message() {
        let ack: ServerAck =
            serde_json::from_str(r#"{"success": true, "message": "Estado actualizado"}"#).unwrap();
        assert_eq!(ack.into_result().unwrap(), "Estado actualizado");
    }

    #[test]
    fn test_ack_envelope_failure_is_rejection() {
        let ack: ServerAck =
            serde_json::from_str(r#"{"success": false, "message": "Transición inválida"}"#)
                .unwrap();
        match ack.into_result() {
            Err(ClientError::Rejected { message }) => assert_eq!(message, "Transición inválida"),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_csrf_token_aborts_before_io() {
        let client = HeptaClient::new("http://localhost:5000", Credentials::new("sess", ""));
        assert!(matches!(
            client.csrf_token(),
            Err(ClientError::MissingCsrfToken)
        ));
    }
}
