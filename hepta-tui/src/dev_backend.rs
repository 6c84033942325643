use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use hepta_client::domain::{
    CatalogStructure, ConnectionDetail, ConnectionRequest, ConnectionStatus, DashboardData,
    DashboardPreferences, DashboardTasks, ProfileSuggestion, ProjectRef, ProjectSummary,
    StatusChange, SubtypeEntry, TaskRow, Tipologia, TypeEntry,
};
use hepta_client::ClientError;

/// Steel profiles known to the dev backend, with the alias used in
/// connection codes where one exists.
const DEV_PROFILES: &[(&str, Option<&str>)] = &[
    ("HEB 200", Some("HEB200")),
    ("HEB 300", Some("HEB300")),
    ("HEA 160", Some("HEA160")),
    ("IPE 200", Some("IPE200")),
    ("IPE 300", Some("IPE300")),
    ("IPE 360", None),
    ("UPN 120", Some("UPN120")),
    ("Tubo 100x100", None),
    ("Tubo 150x150", None),
];

/// In-memory stand-in for the Hepta-Conexiones server, so the full UI runs
/// without a server or credentials.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    rows: Vec<TaskRow>,
    prefs: DashboardPreferences,
    unread: u32,
    next_id: i64,
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(DevStore {
                rows: seed_rows(),
                prefs: DashboardPreferences::default(),
                unread: 3,
                next_id: 100,
            })),
        }
    }

    pub fn dashboard(&self) -> DashboardData {
        let store = self.store.lock().expect("dev store lock poisoned");

        let by_status = |status: ConnectionStatus| -> Vec<TaskRow> {
            store
                .rows
                .iter()
                .filter(|r| r.estado == status)
                .cloned()
                .collect()
        };

        let mut estados: HashMap<ConnectionStatus, u64> = HashMap::new();
        for row in &store.rows {
            *estados.entry(row.estado).or_insert(0) += 1;
        }

        let mut resumen: Vec<ProjectSummary> = Vec::new();
        for row in &store.rows {
            let idx = match resumen.iter().position(|s| s.id == row.proyecto_id) {
                Some(idx) => idx,
                None => {
                    resumen.push(ProjectSummary {
                        id: row.proyecto_id.clone(),
                        nombre: row.proyecto_nombre.clone(),
                        solicitadas: 0,
                        en_proceso: 0,
                        aprobadas: 0,
                        rechazadas: 0,
                    });
                    resumen.len() - 1
                }
            };
            let entry = &mut resumen[idx];
            match row.estado {
                ConnectionStatus::Requested => entry.solicitadas += 1,
                ConnectionStatus::InProgress => entry.en_proceso += 1,
                ConnectionStatus::Approved => entry.aprobadas += 1,
                ConnectionStatus::Rejected => entry.rechazadas += 1,
                ConnectionStatus::Completed => {}
            }
        }
        resumen.sort_by(|a, b| a.nombre.cmp(&b.nombre));

        DashboardData {
            tasks: DashboardTasks {
                pendientes_aprobacion: by_status(ConnectionStatus::Completed),
                mis_asignadas: by_status(ConnectionStatus::InProgress),
                disponibles: by_status(ConnectionStatus::Requested),
                mis_solicitudes: store
                    .rows
                    .iter()
                    .filter(|r| r.estado != ConnectionStatus::Approved)
                    .cloned()
                    .collect(),
            },
            proyectos: seed_projects(),
            resumen_proyectos: resumen,
            estados,
            notificaciones_sin_leer: store.unread,
            preferencias: store.prefs.clone(),
        }
    }

    pub fn catalog(&self) -> CatalogStructure {
        seed_catalog()
    }

    /// Substring search over the seeded profiles, normalized the way the
    /// server does it: spaces and hyphens stripped, lowercased. Alias
    /// matches surface the alias in the label.
    pub fn search_profiles(&self, query: &str) -> Vec<ProfileSuggestion> {
        let normalized_query = normalize(query);
        if normalized_query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<ProfileSuggestion> = DEV_PROFILES
            .iter()
            .filter_map(|&(nombre, alias)| {
                if let Some(alias) = alias {
                    if normalize(alias).contains(&normalized_query) {
                        return Some(ProfileSuggestion {
                            label: format!("{} ({})", alias, nombre),
                            value: nombre.to_string(),
                        });
                    }
                }
                if normalize(nombre).contains(&normalized_query) {
                    return Some(ProfileSuggestion {
                        label: nombre.to_string(),
                        value: nombre.to_string(),
                    });
                }
                None
            })
            .collect();

        results.sort_by(|a, b| a.label.cmp(&b.label));
        results.truncate(10);
        results
    }

    pub fn change_status(
        &self,
        conexion_id: i64,
        change: &StatusChange,
    ) -> Result<String, ClientError> {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let row = store
            .rows
            .iter_mut()
            .find(|r| r.id == conexion_id)
            .ok_or_else(|| ClientError::Rejected {
                message: "Conexión no encontrada.".to_string(),
            })?;

        if change.estado == ConnectionStatus::Rejected
            && change.detalles.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err(ClientError::Rejected {
                message: "Debes proporcionar un motivo para el rechazo.".to_string(),
            });
        }

        row.estado = change.estado;
        Ok(format!(
            "Estado de {} actualizado a {}.",
            row.codigo_conexion,
            change.estado.label()
        ))
    }

    pub fn create_connection(&self, request: &ConnectionRequest) -> Result<String, ClientError> {
        let mut store = self.store.lock().expect("dev store lock poisoned");

        let mut code = request.tipologia_nombre.clone();
        let catalog = seed_catalog();
        if let Some(tipologia) = catalog
            .get(&request.tipo)
            .and_then(|t| t.subtipos.get(&request.subtipo))
            .and_then(|s| s.tipologias.iter().find(|t| t.nombre == request.tipologia_nombre))
        {
            if !tipologia.plantilla.is_empty() {
                code = tipologia.plantilla.clone();
                for (i, perfil) in request.perfiles.iter().enumerate() {
                    let alias = DEV_PROFILES
                        .iter()
                        .find(|&&(nombre, _)| nombre == perfil)
                        .and_then(|&(_, alias)| alias)
                        .unwrap_or(perfil.as_str());
                    code = code.replace(&format!("{{p{}}}", i + 1), alias);
                }
            }
        }

        let project_name = seed_projects()
            .into_iter()
            .find(|p| p.id == request.proyecto_id)
            .map(|p| p.nombre)
            .ok_or_else(|| ClientError::Rejected {
                message: "Error: El proyecto seleccionado ya no existe.".to_string(),
            })?;

        let id = store.next_id;
        store.next_id += 1;
        store.rows.push(TaskRow {
            id,
            codigo_conexion: code.clone(),
            proyecto_id: request.proyecto_id.clone(),
            proyecto_nombre: project_name,
            tipo: request.tipo.clone(),
            estado: ConnectionStatus::Requested,
            fecha_creacion: Utc::now(),
        });

        Ok(format!("Conexión {} creada con éxito.", code))
    }

    pub fn project_details(
        &self,
        proyecto_id: &str,
        estado: ConnectionStatus,
    ) -> Vec<ConnectionDetail> {
        let store = self.store.lock().expect("dev store lock poisoned");
        store
            .rows
            .iter()
            .filter(|r| r.proyecto_id == proyecto_id && r.estado == estado)
            .map(|r| ConnectionDetail {
                id: r.id,
                codigo_conexion: r.codigo_conexion.clone(),
                fecha_creacion: r.fecha_creacion,
            })
            .collect()
    }

    pub fn mark_notifications_read(&self) {
        self.store.lock().expect("dev store lock poisoned").unread = 0;
    }

    pub fn save_preferences(&self, prefs: &DashboardPreferences) -> String {
        self.store.lock().expect("dev store lock poisoned").prefs = prefs.clone();
        "Preferencias guardadas.".to_string()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

fn seed_projects() -> Vec<ProjectRef> {
    vec![
        ProjectRef {
            id: "1".to_string(),
            nombre: "Torre Norte".to_string(),
        },
        ProjectRef {
            id: "2".to_string(),
            nombre: "Puente Sur".to_string(),
        },
        ProjectRef {
            id: "3".to_string(),
            nombre: "Nave Industrial Este".to_string(),
        },
    ]
}

fn seed_rows() -> Vec<TaskRow> {
    let row = |id: i64, code: &str, project: usize, tipo: &str, estado, days_ago: i64| {
        let projects = seed_projects();
        TaskRow {
            id,
            codigo_conexion: code.to_string(),
            proyecto_id: projects[project].id.clone(),
            proyecto_nombre: projects[project].nombre.clone(),
            tipo: tipo.to_string(),
            estado,
            fecha_creacion: Utc::now() - Duration::days(days_ago),
        }
    };

    vec![
        row(1, "PE-HEB200-IPE300", 0, "Momento", ConnectionStatus::Requested, 1),
        row(2, "PE-HEB300-IPE300", 0, "Momento", ConnectionStatus::Requested, 2),
        row(3, "ES-IPE200", 0, "Cortante", ConnectionStatus::InProgress, 3),
        row(4, "PA-HEA160-IPE200", 1, "Momento", ConnectionStatus::Completed, 5),
        row(5, "ES-UPN120", 1, "Cortante", ConnectionStatus::Approved, 8),
        row(6, "BP-HEB200", 2, "Axial", ConnectionStatus::Requested, 1),
        row(7, "BP-HEB300", 2, "Axial", ConnectionStatus::Rejected, 13),
        row(8, "ES-IPE300-2", 2, "Cortante", ConnectionStatus::Completed, 2),
    ]
}

fn seed_catalog() -> CatalogStructure {
    let tipologia = |nombre: &str, plantilla: &str, perfiles: u8| Tipologia {
        nombre: nombre.to_string(),
        plantilla: plantilla.to_string(),
        perfiles,
    };

    let mut momento = TypeEntry::default();
    momento.subtipos.insert(
        "Viga-Columna".to_string(),
        SubtypeEntry {
            tipologias: vec![
                tipologia("Placa extrema", "PE-{p1}-{p2}", 2),
                tipologia("Placa apernada", "PA-{p1}-{p2}", 2),
            ],
        },
    );
    momento.subtipos.insert(
        "Viga-Viga".to_string(),
        SubtypeEntry {
            tipologias: vec![tipologia("Empalme de momento", "EM-{p1}", 1)],
        },
    );

    let mut cortante = TypeEntry::default();
    cortante.subtipos.insert(
        "Viga-Viga".to_string(),
        SubtypeEntry {
            tipologias: vec![
                tipologia("Enlace simple", "ES-{p1}", 1),
                tipologia("Doble ángulo", "DA-{p1}-{p2}", 2),
            ],
        },
    );

    let mut axial = TypeEntry::default();
    axial.subtipos.insert(
        "Columna-Base".to_string(),
        SubtypeEntry {
            tipologias: vec![tipologia("Placa base", "BP-{p1}", 1)],
        },
    );

    let mut structure = CatalogStructure::new();
    structure.insert("Momento".to_string(), momento);
    structure.insert("Cortante".to_string(), cortante);
    structure.insert("Axial".to_string(), axial);
    structure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_search_normalizes_spaces_and_hyphens() {
        let backend = DevBackend::new();
        let results = backend.search_profiles("heb2");
        assert!(results.iter().any(|s| s.value == "HEB 200"));
        // Alias match shows the alias in the label.
        let heb = results.iter().find(|s| s.value == "HEB 200").unwrap();
        assert_eq!(heb.label, "HEB200 (HEB 200)");
    }

    #[test]
    fn test_change_status_moves_row_between_panels() {
        let backend = DevBackend::new();
        let message = backend
            .change_status(1, &StatusChange::to_status(ConnectionStatus::InProgress))
            .unwrap();
        assert!(message.contains("PE-HEB200-IPE300"));

        let data = backend.dashboard();
        assert!(data.tasks.mis_asignadas.iter().any(|r| r.id == 1));
        assert!(!data.tasks.disponibles.iter().any(|r| r.id == 1));
    }

    #[test]
    fn test_reject_without_motive_is_rejected() {
        let backend = DevBackend::new();
        let change = StatusChange {
            estado: ConnectionStatus::Rejected,
            detalles: None,
        };
        assert!(matches!(
            backend.change_status(4, &change),
            Err(ClientError::Rejected { .. })
        ));
    }

    #[test]
    fn test_create_connection_expands_template_with_aliases() {
        let backend = DevBackend::new();
        let message = backend
            .create_connection(&ConnectionRequest {
                proyecto_id: "1".to_string(),
                tipo: "Momento".to_string(),
                subtipo: "Viga-Columna".to_string(),
                tipologia_nombre: "Placa extrema".to_string(),
                descripcion: String::new(),
                perfiles: vec!["HEB 200".to_string(), "IPE 360".to_string()],
            })
            .unwrap();
        // HEB 200 has an alias, IPE 360 does not.
        assert!(message.contains("PE-HEB200-IPE 360"));
    }

    #[test]
    fn test_project_details_filters_by_project_and_status() {
        let backend = DevBackend::new();
        let details = backend.project_details("1", ConnectionStatus::Requested);
        assert_eq!(details.len(), 2);
        assert!(backend
            .project_details("1", ConnectionStatus::Rejected)
            .is_empty());
    }
}
