use hepta_client::domain::{ConnectionStatus, StatusChange};
use thiserror::Error;

/// Quick actions available on dashboard task rows.
///
/// Dispatch goes through this registry by identifier, not by whatever the
/// rendered button happens to be styled as, so presentation and behavior stay
/// decoupled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Take,
    MarkDone,
    Approve,
    Reject,
}

/// Checked before any network access; surfaced synchronously as a blocking
/// notice and the action is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionViolation {
    #[error("Debes proporcionar un motivo para el rechazo.")]
    MissingRejectMotive,
}

impl QuickAction {
    pub const ALL: [QuickAction; 4] = [
        QuickAction::Take,
        QuickAction::MarkDone,
        QuickAction::Approve,
        QuickAction::Reject,
    ];

    /// Stable identifier used for dispatch and key-binding lookup.
    pub fn id(&self) -> &'static str {
        match self {
            QuickAction::Take => "tomar",
            QuickAction::MarkDone => "realizado",
            QuickAction::Approve => "aprobar",
            QuickAction::Reject => "rechazar",
        }
    }

    pub fn from_id(id: &str) -> Option<QuickAction> {
        QuickAction::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Take => "Tomar",
            QuickAction::MarkDone => "Realizado",
            QuickAction::Approve => "Aprobar",
            QuickAction::Reject => "Rechazar",
        }
    }

    /// Keyboard shortcut shown next to the label.
    pub fn key(&self) -> char {
        match self {
            QuickAction::Take => 't',
            QuickAction::MarkDone => 'r',
            QuickAction::Approve => 'a',
            QuickAction::Reject => 'x',
        }
    }

    pub fn target_status(&self) -> ConnectionStatus {
        match self {
            QuickAction::Take => ConnectionStatus::InProgress,
            QuickAction::MarkDone => ConnectionStatus::Completed,
            QuickAction::Approve => ConnectionStatus::Approved,
            QuickAction::Reject => ConnectionStatus::Rejected,
        }
    }

    pub fn needs_motive(&self) -> bool {
        matches!(self, QuickAction::Reject)
    }

    /// Actions that apply to a row in the given state, per the connection
    /// workflow: requested work can be taken, taken work marked done, done
    /// work approved or rejected.
    pub fn available_for(status: ConnectionStatus) -> &'static [QuickAction] {
        match status {
            ConnectionStatus::Requested => &[QuickAction::Take],
            ConnectionStatus::InProgress => &[QuickAction::MarkDone],
            ConnectionStatus::Completed => &[QuickAction::Approve, QuickAction::Reject],
            ConnectionStatus::Approved | ConnectionStatus::Rejected => &[],
        }
    }

    /// Build the status-change payload, enforcing the reject-motive
    /// precondition before anything touches the network.
    pub fn build_change(
        &self,
        motive: Option<&str>,
    ) -> Result<StatusChange, PreconditionViolation> {
        if self.needs_motive() {
            let motive = motive
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .ok_or(PreconditionViolation::MissingRejectMotive)?;
            return Ok(StatusChange::rejection(motive));
        }
        Ok(StatusChange::to_status(self.target_status()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for action in QuickAction::ALL {
            assert_eq!(QuickAction::from_id(action.id()), Some(action));
        }
        assert_eq!(QuickAction::from_id("archivar"), None);
    }

    #[test]
    fn test_reject_without_motive_is_a_precondition_violation() {
        assert_eq!(
            QuickAction::Reject.build_change(None),
            Err(PreconditionViolation::MissingRejectMotive)
        );
        assert_eq!(
            QuickAction::Reject.build_change(Some("   ")),
            Err(PreconditionViolation::MissingRejectMotive)
        );
    }

    #[test]
    fn test_reject_with_motive_builds_rejection() {
        let change = QuickAction::Reject
            .build_change(Some("perfil incompatible"))
            .unwrap();
        assert_eq!(change.estado, ConnectionStatus::Rejected);
        assert_eq!(change.detalles.as_deref(), Some("perfil incompatible"));
    }

    #[test]
    fn test_plain_actions_need_no_motive() {
        let change = QuickAction::Take.build_change(None).unwrap();
        assert_eq!(change.estado, ConnectionStatus::InProgress);
        assert_eq!(change.detalles, None);
    }

    #[test]
    fn test_workflow_availability() {
        assert_eq!(
            QuickAction::available_for(ConnectionStatus::Requested),
            &[QuickAction::Take]
        );
        assert_eq!(
            QuickAction::available_for(ConnectionStatus::Completed),
            &[QuickAction::Approve, QuickAction::Reject]
        );
        assert!(QuickAction::available_for(ConnectionStatus::Approved).is_empty());
    }
}
