//! Fetch lifecycle shared by every view model.

use crate::error::{ErrorKind, SdkError};

/// The only text a failed view shows, whatever the underlying kind.
pub const USER_ERROR_MESSAGE: &str = "Server responds with error";

/// Why the last fetch failed. Kept for logging; not shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReason {
    pub kind: ErrorKind,
    pub detail: String,
}

impl FailureReason {
    pub fn from_error(err: &SdkError) -> Self {
        Self {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }

    pub fn user_message(&self) -> &'static str {
        USER_ERROR_MESSAGE
    }
}

/// `Idle → Loading → {Loaded, Failed}`; both terminal states re-enter `Loading` on a fresh fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FailureReason),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }

    pub fn error(&self) -> Option<&FailureReason> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Identifies one issued request. Only the most recently issued ticket may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter owned by one view model.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Supersede outstanding tickets without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;

    #[test]
    fn test_latest_ticket_is_current() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn test_invalidate_retires_outstanding_ticket() {
        let mut seq = RequestSequencer::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_failure_reason_keeps_kind_but_generic_message() {
        let err = SdkError::from(HttpError::NotFound("no such coin".into()));
        let reason = FailureReason::from_error(&err);
        assert_eq!(reason.kind, ErrorKind::NotFound);
        assert!(reason.detail.contains("no such coin"));
        assert_eq!(reason.user_message(), "Server responds with error");
    }

    #[test]
    fn test_load_state_accessors() {
        assert!(!LoadState::Idle.is_loading());
        assert!(LoadState::Loading.is_loading());
        assert!(LoadState::Loaded.is_loaded());
        let failed = LoadState::Failed(FailureReason {
            kind: ErrorKind::Transport,
            detail: "timeout".into(),
        });
        assert_eq!(failed.error().map(|r| r.kind), Some(ErrorKind::Transport));
        assert!(LoadState::Loaded.error().is_none());
    }
}
