use serde::{Deserialize, Serialize};

/// Lifecycle state of a connection request.
///
/// The wire format is the upper-snake Spanish string the server stores;
/// anything else fails deserialization at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[serde(rename = "SOLICITADO")]
    Requested,
    #[serde(rename = "EN_PROCESO")]
    InProgress,
    #[serde(rename = "REALIZADO")]
    Completed,
    #[serde(rename = "APROBADO")]
    Approved,
    #[serde(rename = "RECHAZADO")]
    Rejected,
}

impl ConnectionStatus {
    pub const ALL: [ConnectionStatus; 5] = [
        ConnectionStatus::Requested,
        ConnectionStatus::InProgress,
        ConnectionStatus::Completed,
        ConnectionStatus::Approved,
        ConnectionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Requested => "SOLICITADO",
            ConnectionStatus::InProgress => "EN_PROCESO",
            ConnectionStatus::Completed => "REALIZADO",
            ConnectionStatus::Approved => "APROBADO",
            ConnectionStatus::Rejected => "RECHAZADO",
        }
    }

    /// Display label as shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Requested => "Solicitado",
            ConnectionStatus::InProgress => "En Proceso",
            ConnectionStatus::Completed => "Realizado",
            ConnectionStatus::Approved => "Aprobado",
            ConnectionStatus::Rejected => "Rechazado",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload for `POST /conexiones/{id}/cambiar_estado`.
///
/// `detalles` is only meaningful for rejections, where the server requires a
/// motive; the client enforces that before sending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusChange {
    pub estado: ConnectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalles: Option<String>,
}

impl StatusChange {
    pub fn to_status(status: ConnectionStatus) -> Self {
        Self {
            estado: status,
            detalles: None,
        }
    }

    pub fn rejection(motive: impl Into<String>) -> Self {
        Self {
            estado: ConnectionStatus::Rejected,
            detalles: Some(motive.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_roundtrip() {
        for status in ConnectionStatus::ALL {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
            let back: ConnectionStatus = serde_json::from_str(&wire).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_str::<ConnectionStatus>("\"ARCHIVADO\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejection_carries_motive() {
        let change = StatusChange::rejection("perfil incompatible");
        assert_eq!(change.estado, ConnectionStatus::Rejected);
        assert_eq!(change.detalles.as_deref(), Some("perfil incompatible"));
    }
}
