use chrono::{DateTime, Utc};
use hepta_client::domain::{ConnectionStatus, DashboardTasks, TaskRow};

/// The four task panels of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTab {
    PendingApproval,
    Assigned,
    Available,
    MyRequests,
}

impl TaskTab {
    pub const ALL: [TaskTab; 4] = [
        TaskTab::PendingApproval,
        TaskTab::Assigned,
        TaskTab::Available,
        TaskTab::MyRequests,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TaskTab::PendingApproval => "Pendientes",
            TaskTab::Assigned => "Asignadas",
            TaskTab::Available => "Disponibles",
            TaskTab::MyRequests => "Solicitudes",
        }
    }

    pub fn next(&self) -> TaskTab {
        match self {
            TaskTab::PendingApproval => TaskTab::Assigned,
            TaskTab::Assigned => TaskTab::Available,
            TaskTab::Available => TaskTab::MyRequests,
            TaskTab::MyRequests => TaskTab::PendingApproval,
        }
    }

    pub fn previous(&self) -> TaskTab {
        match self {
            TaskTab::PendingApproval => TaskTab::MyRequests,
            TaskTab::Assigned => TaskTab::PendingApproval,
            TaskTab::Available => TaskTab::Assigned,
            TaskTab::MyRequests => TaskTab::Available,
        }
    }
}

/// One filterable row of a task panel. The fetched attributes are fixed once
/// built; `visible` is the only derived field and is recomputed on every
/// filter pass.
#[derive(Debug, Clone)]
pub struct BoardRow {
    pub id: i64,
    pub code: String,
    pub project_id: String,
    pub project_name: String,
    pub kind: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub visible: bool,
}

impl From<TaskRow> for BoardRow {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            code: row.codigo_conexion,
            project_id: row.proyecto_id,
            project_name: row.proyecto_nombre,
            kind: row.tipo,
            status: row.estado,
            created_at: row.fecha_creacion,
            visible: true,
        }
    }
}

/// Per-tab row sets, built from one dashboard payload.
#[derive(Debug, Clone, Default)]
pub struct BoardPanels {
    pub pending_approval: Vec<BoardRow>,
    pub assigned: Vec<BoardRow>,
    pub available: Vec<BoardRow>,
    pub my_requests: Vec<BoardRow>,
}

impl BoardPanels {
    pub fn from_tasks(tasks: DashboardTasks) -> Self {
        let into_rows = |rows: Vec<TaskRow>| rows.into_iter().map(BoardRow::from).collect();
        Self {
            pending_approval: into_rows(tasks.pendientes_aprobacion),
            assigned: into_rows(tasks.mis_asignadas),
            available: into_rows(tasks.disponibles),
            my_requests: into_rows(tasks.mis_solicitudes),
        }
    }

    pub fn rows(&self, tab: TaskTab) -> &[BoardRow] {
        match tab {
            TaskTab::PendingApproval => &self.pending_approval,
            TaskTab::Assigned => &self.assigned,
            TaskTab::Available => &self.available,
            TaskTab::MyRequests => &self.my_requests,
        }
    }

    pub fn rows_mut(&mut self, tab: TaskTab) -> &mut Vec<BoardRow> {
        match tab {
            TaskTab::PendingApproval => &mut self.pending_approval,
            TaskTab::Assigned => &mut self.assigned,
            TaskTab::Available => &mut self.available,
            TaskTab::MyRequests => &mut self.my_requests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_built_from_wire_payload_start_visible() {
        let raw = r#"{
            "disponibles": [{
                "id": 12,
                "codigo_conexion": "PE-HEB200-IPE300",
                "proyecto_id": "1",
                "proyecto_nombre": "Torre Norte",
                "tipo": "Momento",
                "estado": "SOLICITADO",
                "fecha_creacion": "2026-03-01T10:30:00Z"
            }],
            "mis_solicitudes": []
        }"#;
        let tasks: DashboardTasks = serde_json::from_str(raw).unwrap();
        let panels = BoardPanels::from_tasks(tasks);

        assert_eq!(panels.rows(TaskTab::Available).len(), 1);
        let row = &panels.rows(TaskTab::Available)[0];
        assert_eq!(row.code, "PE-HEB200-IPE300");
        assert_eq!(row.status, ConnectionStatus::Requested);
        assert!(row.visible);
        assert!(panels.rows(TaskTab::PendingApproval).is_empty());
    }

    #[test]
    fn test_tab_cycle_is_a_ring() {
        let mut tab = TaskTab::PendingApproval;
        for _ in 0..TaskTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, TaskTab::PendingApproval);
        assert_eq!(TaskTab::Assigned.previous(), TaskTab::PendingApproval);
    }
}
