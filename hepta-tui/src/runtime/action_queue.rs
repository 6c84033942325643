use hepta_client::domain::{ConnectionDetail, ConnectionStatus, ProfileSuggestion};
use hepta_client::ClientError;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::commands::QuickAction;

/// Deferred work drained by the event loop between frames. Everything that
/// touches the network goes through here so key handlers stay synchronous.
#[derive(Debug)]
pub(super) enum Action {
    ExecuteQuickAction {
        conexion_id: i64,
        code: String,
        action: QuickAction,
        motive: Option<String>,
    },
    RefreshDashboard,
    OpenDrilldown {
        proyecto_id: String,
        proyecto_nombre: String,
        estado: ConnectionStatus,
    },
    FinishDrilldown {
        result: Result<Vec<ConnectionDetail>, ClientError>,
    },
    MarkNotificationsRead,
    PersistTheme,
    SavePreferences,
    SubmitConnectionForm,
    StartProfileLookup {
        field: usize,
        query: String,
    },
    FinishProfileLookup {
        field: usize,
        generation: u64,
        result: Result<Vec<ProfileSuggestion>, ClientError>,
    },
    BlurProfileField {
        field: usize,
    },
    ClearSuggestionsAfterBlur {
        field: usize,
        generation: u64,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
