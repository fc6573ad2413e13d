//! Dialog state machine — tracks which prompt a conversation is waiting on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::UserProfile;
use crate::error::DialogError;

/// The phases of the profile dialog.
///
/// Progresses forward only: Init → AwaitName → AwaitCity → AwaitPhone → Done,
/// skipping any prompt whose field is already populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogPhase {
    Init,
    AwaitName,
    AwaitCity,
    AwaitPhone,
    Done,
}

impl DialogPhase {
    const PROMPTS: [DialogPhase; 3] = [Self::AwaitName, Self::AwaitCity, Self::AwaitPhone];

    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Any forward move is allowed since populated fields are skipped.
    pub fn can_transition_to(&self, target: DialogPhase) -> bool {
        !self.is_terminal() && target > *self && target != Self::Init
    }

    /// Whether this phase is terminal (the dialog has ended).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether this phase suspends the dialog waiting for an answer.
    pub fn is_prompt(&self) -> bool {
        matches!(self, Self::AwaitName | Self::AwaitCity | Self::AwaitPhone)
    }

    /// Whether the field this phase asks for is already filled in.
    pub fn is_satisfied_by(&self, profile: &UserProfile) -> bool {
        match self {
            Self::AwaitName => profile.name.is_some(),
            Self::AwaitCity => profile.city.is_some(),
            Self::AwaitPhone => profile.phone.is_some(),
            Self::Init | Self::Done => true,
        }
    }

    /// Guarded transition: the first later prompt whose field is missing,
    /// or `Done` when nothing is left to ask.
    pub fn next_for(&self, profile: &UserProfile) -> DialogPhase {
        if *self == Self::Init && profile.is_complete() {
            return Self::Done;
        }
        Self::PROMPTS
            .into_iter()
            .filter(|phase| phase > self)
            .find(|phase| !phase.is_satisfied_by(profile))
            .unwrap_or(Self::Done)
    }
}

impl Default for DialogPhase {
    fn default() -> Self {
        Self::Init
    }
}

impl std::fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::AwaitName => "await_name",
            Self::AwaitCity => "await_city",
            Self::AwaitPhone => "await_phone",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// Persisted dialog state for one conversation.
///
/// Stored under `"<dialog_id>.state"` while the dialog is running and
/// removed when it reaches `Done`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogState {
    /// Identifies one run of the dialog in logs.
    pub run_id: Uuid,
    /// Current phase.
    pub phase: DialogPhase,
    /// Failed validations for the current prompt.
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
}

impl Default for DialogState {
    fn default() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            phase: DialogPhase::default(),
            attempts: 0,
            started_at: Utc::now(),
        }
    }
}

impl DialogState {
    /// Move to the next phase the profile calls for.
    pub fn advance(&mut self, profile: &UserProfile) -> Result<DialogPhase, DialogError> {
        let next = self.phase.next_for(profile);
        if !self.phase.can_transition_to(next) {
            return Err(DialogError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        self.attempts = 0;
        Ok(next)
    }

    /// Record a rejected answer for the current prompt.
    pub fn record_rejection(&mut self) {
        self.attempts += 1;
    }
}
