use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConnectionStatus;

/// One task row as it appears in the dashboard panels.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskRow {
    pub id: i64,
    pub codigo_conexion: String,
    pub proyecto_id: String,
    pub proyecto_nombre: String,
    pub tipo: String,
    pub estado: ConnectionStatus,
    pub fecha_creacion: DateTime<Utc>,
}

/// The four role-dependent task lists of the dashboard. Lists the user's
/// roles don't grant come back empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardTasks {
    #[serde(default)]
    pub pendientes_aprobacion: Vec<TaskRow>,
    #[serde(default)]
    pub mis_asignadas: Vec<TaskRow>,
    #[serde(default)]
    pub disponibles: Vec<TaskRow>,
    #[serde(default)]
    pub mis_solicitudes: Vec<TaskRow>,
}

/// A project the user can file connections under.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectRef {
    pub id: String,
    pub nombre: String,
}

/// Per-project status counts backing the stacked summary chart.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub nombre: String,
    pub solicitadas: u64,
    pub en_proceso: u64,
    pub aprobadas: u64,
    pub rechazadas: u64,
}

/// Everything the dashboard needs, fetched in one request at startup and on
/// refresh.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardData {
    pub tasks: DashboardTasks,
    #[serde(default)]
    pub proyectos: Vec<ProjectRef>,
    #[serde(default)]
    pub resumen_proyectos: Vec<ProjectSummary>,
    #[serde(default)]
    pub estados: HashMap<ConnectionStatus, u64>,
    #[serde(default)]
    pub notificaciones_sin_leer: u32,
    #[serde(default)]
    pub preferencias: DashboardPreferences,
}

/// One connection in a drill-down result
/// (`GET /api/dashboard/project-details`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionDetail {
    pub id: i64,
    pub codigo_conexion: String,
    pub fecha_creacion: DateTime<Utc>,
}

/// Widget visibility configuration persisted per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardPreferences {
    pub widgets_config: HashMap<String, bool>,
}

impl DashboardPreferences {
    /// Panels shown when the user has never saved a configuration, and the
    /// fallback for panels missing from a saved one.
    pub fn default_visible_widgets() -> &'static [&'static str] {
        &[
            "my-summary-panel",
            "my-performance-panel",
            "my-projects-summary-panel",
            "quick-actions-panel",
            "tasks-panel",
            "recent-activity-panel",
            "admin-panel",
        ]
    }

    /// Resolved visibility for a panel: the saved flag if present, otherwise
    /// visible iff the panel is in the default set.
    pub fn is_visible(&self, panel_id: &str) -> bool {
        match self.widgets_config.get(panel_id) {
            Some(flag) => *flag,
            None => Self::default_visible_widgets().contains(&panel_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_data_parses_partial_payload() {
        let raw = r#"{
            "tasks": {
                "disponibles": [{
                    "id": 12,
                    "codigo_conexion": "CON-012",
                    "proyecto_id": "3",
                    "proyecto_nombre": "Torre Norte",
                    "tipo": "Viga-Columna",
                    "estado": "SOLICITADO",
                    "fecha_creacion": "2026-03-01T10:30:00Z"
                }]
            },
            "estados": {"SOLICITADO": 4, "APROBADO": 2}
        }"#;
        let data: DashboardData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.tasks.disponibles.len(), 1);
        assert!(data.tasks.mis_asignadas.is_empty());
        assert_eq!(data.estados[&ConnectionStatus::Requested], 4);
        assert_eq!(data.notificaciones_sin_leer, 0);
    }

    #[test]
    fn test_unknown_estado_in_row_fails_parsing() {
        let raw = r#"{
            "id": 1,
            "codigo_conexion": "CON-001",
            "proyecto_id": "1",
            "proyecto_nombre": "Torre Norte",
            "tipo": "Viga-Viga",
            "estado": "DESCONOCIDO",
            "fecha_creacion": "2026-03-01T10:30:00Z"
        }"#;
        assert!(serde_json::from_str::<TaskRow>(raw).is_err());
    }

    #[test]
    fn test_preferences_fall_back_to_default_set() {
        let mut prefs = DashboardPreferences::default();
        assert!(prefs.is_visible("tasks-panel"));
        assert!(!prefs.is_visible("unknown-panel"));

        prefs.widgets_config.insert("tasks-panel".to_string(), false);
        assert!(!prefs.is_visible("tasks-panel"));
    }
}
