mod catalog;
mod dashboard;
mod profile;
mod status;

pub use catalog::{CatalogStructure, ConnectionRequest, SubtypeEntry, Tipologia, TypeEntry};
pub use dashboard::{
    ConnectionDetail, DashboardData, DashboardPreferences, DashboardTasks, ProjectRef,
    ProjectSummary, TaskRow,
};
pub use profile::ProfileSuggestion;
pub use status::{ConnectionStatus, StatusChange};
