//! ProfileDialog — runs the name → city → phone collection flow for a
//! conversation, suspending at each prompt until the next answer arrives.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::DialogError;
use crate::store::{SettingsStore, StateAccessor};

use super::model::{UserProfile, capitalize, settings_keys};
use super::prompts::{Validation, prompt_for};
use super::state::{DialogPhase, DialogState};

/// What one `begin`/`resume` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogTurn {
    /// Messages to send back to the respondent, in order.
    pub messages: Vec<String>,
    /// Phase the dialog is in after this turn.
    pub phase: DialogPhase,
    /// Profile as stored after this turn.
    pub profile: UserProfile,
}

impl DialogTurn {
    /// Whether the dialog ended with this turn.
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Dialog status returned by the REST endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DialogStatus {
    pub conversation: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<DialogPhase>,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}

/// Collects a `UserProfile` one prompt at a time.
///
/// All state lives in the injected `SettingsStore`, scoped by conversation
/// key, so one instance serves any number of conversations.
pub struct ProfileDialog {
    dialog_id: String,
    profiles: StateAccessor<UserProfile>,
    states: StateAccessor<DialogState>,
}

/// Builder for [`ProfileDialog`]; both fields are required.
#[derive(Default)]
pub struct ProfileDialogBuilder {
    dialog_id: Option<String>,
    store: Option<Arc<dyn SettingsStore>>,
}

impl ProfileDialogBuilder {
    pub fn dialog_id(mut self, dialog_id: impl Into<String>) -> Self {
        self.dialog_id = Some(dialog_id.into());
        self
    }

    pub fn store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<ProfileDialog, DialogError> {
        let dialog_id = self
            .dialog_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(DialogError::MissingArgument("dialog_id"))?;
        let store = self.store.ok_or(DialogError::MissingArgument("store"))?;

        let state_key = format!("{dialog_id}.{}", settings_keys::DIALOG_STATE_SUFFIX);
        Ok(ProfileDialog {
            profiles: StateAccessor::new(Arc::clone(&store), settings_keys::USER_PROFILE),
            states: StateAccessor::new(store, state_key),
            dialog_id,
        })
    }
}

impl ProfileDialog {
    pub fn builder() -> ProfileDialogBuilder {
        ProfileDialogBuilder::default()
    }

    pub fn dialog_id(&self) -> &str {
        &self.dialog_id
    }

    /// Whether a dialog is waiting on an answer in this conversation.
    pub async fn is_active(&self, conversation: &str) -> Result<bool, DialogError> {
        Ok(self.states.get(conversation).await?.is_some())
    }

    /// Start the dialog.
    ///
    /// Creates the profile from `seed` if the conversation has none yet
    /// (an existing profile is left untouched), then moves to the first
    /// missing field. A complete profile goes straight to the summary.
    /// Starting over an active dialog discards its pending prompt.
    pub async fn begin(
        &self,
        conversation: &str,
        seed: Option<UserProfile>,
    ) -> Result<DialogTurn, DialogError> {
        let profile = match self.profiles.get(conversation).await? {
            Some(existing) => existing,
            None => {
                let profile = seed.unwrap_or_default();
                self.profiles.set(conversation, &profile).await?;
                profile
            }
        };

        let state = DialogState::default();
        info!(
            conversation,
            dialog = %self.dialog_id,
            run_id = %state.run_id,
            "Profile dialog started"
        );
        self.advance(conversation, state, profile, Vec::new()).await
    }

    /// Feed the respondent's answer to the pending prompt.
    pub async fn resume(&self, conversation: &str, input: &str) -> Result<DialogTurn, DialogError> {
        let mut state = self
            .states
            .get(conversation)
            .await?
            .ok_or_else(|| DialogError::NotActive {
                conversation: conversation.to_string(),
            })?;

        let Some(prompt) = prompt_for(state.phase) else {
            // A stored state that is not waiting on a prompt is stale.
            self.states.delete(conversation).await?;
            return Err(DialogError::NotActive {
                conversation: conversation.to_string(),
            });
        };

        let mut profile = self.profiles.get(conversation).await?.unwrap_or_default();

        if let Validation::Rejected { feedback } = prompt.validator.validate(input) {
            state.record_rejection();
            warn!(
                conversation,
                run_id = %state.run_id,
                prompt = prompt.id,
                attempts = state.attempts,
                "Answer rejected, re-prompting"
            );
            self.states.set(conversation, &state).await?;
            return Ok(DialogTurn {
                messages: vec![feedback, prompt.text.to_string()],
                phase: state.phase,
                profile,
            });
        }

        let answer = capitalize(input);
        match state.phase {
            DialogPhase::AwaitName => profile.name = Some(answer),
            DialogPhase::AwaitCity => profile.city = Some(answer),
            DialogPhase::AwaitPhone => profile.phone = Some(answer),
            DialogPhase::Init | DialogPhase::Done => {}
        }
        self.profiles.set(conversation, &profile).await?;

        self.advance(conversation, state, profile, Vec::new()).await
    }

    /// Current status for a conversation (for the REST endpoint).
    pub async fn status(&self, conversation: &str) -> Result<DialogStatus, DialogError> {
        let state = self.states.get(conversation).await?;
        let profile = self.profiles.get(conversation).await?;
        Ok(DialogStatus {
            conversation: conversation.to_string(),
            active: state.is_some(),
            phase: state.as_ref().map(|s| s.phase),
            attempts: state.as_ref().map(|s| s.attempts).unwrap_or(0),
            profile,
        })
    }

    /// Move to the next phase, then either ask its question or finish.
    async fn advance(
        &self,
        conversation: &str,
        mut state: DialogState,
        profile: UserProfile,
        mut messages: Vec<String>,
    ) -> Result<DialogTurn, DialogError> {
        let from = state.phase;
        let phase = state.advance(&profile)?;
        debug!(conversation, run_id = %state.run_id, %from, to = %phase, "Dialog transition");

        match prompt_for(phase) {
            Some(prompt) => {
                messages.push(prompt.text.to_string());
                self.states.set(conversation, &state).await?;
            }
            None => {
                messages.push(profile.summary());
                self.states.delete(conversation).await?;
                info!(conversation, run_id = %state.run_id, "Profile dialog complete");
            }
        }

        Ok(DialogTurn {
            messages,
            phase,
            profile,
        })
    }
}
