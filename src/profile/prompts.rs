//! Prompt texts and answer validators for each dialog phase.

use super::state::DialogPhase;

/// Minimum trimmed length accepted for a name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    /// The prompt is re-asked after sending `feedback`.
    Rejected { feedback: String },
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Checks a raw answer before it is stored.
pub trait PromptValidator: Send + Sync {
    fn validate(&self, input: &str) -> Validation;
}

/// Requires at least `min` characters after trimming.
#[derive(Debug, Clone)]
pub struct MinLength {
    pub min: usize,
    pub feedback: String,
}

impl PromptValidator for MinLength {
    fn validate(&self, input: &str) -> Validation {
        if input.trim().chars().count() >= self.min {
            Validation::Accepted
        } else {
            Validation::Rejected {
                feedback: self.feedback.clone(),
            }
        }
    }
}

/// Accepts every answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PromptValidator for AcceptAll {
    fn validate(&self, _input: &str) -> Validation {
        Validation::Accepted
    }
}

/// A question sent to the respondent, with the rule its answer must pass.
pub struct PromptSpec {
    pub id: &'static str,
    pub text: &'static str,
    pub validator: Box<dyn PromptValidator>,
}

impl std::fmt::Debug for PromptSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptSpec")
            .field("id", &self.id)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

pub const NAME_PROMPT: &str = "What is your name?";
pub const CITY_PROMPT: &str = "Which city do you live in?";
pub const PHONE_PROMPT: &str = "What is your phone number?";

/// Sent when a name answer is too short.
pub fn name_length_feedback() -> String {
    format!("Names must be at least {MIN_NAME_LENGTH} characters long. Please try again.")
}

/// Build the prompt for a phase, or `None` for phases that do not ask anything.
pub fn prompt_for(phase: DialogPhase) -> Option<PromptSpec> {
    match phase {
        DialogPhase::AwaitName => Some(PromptSpec {
            id: "name_prompt",
            text: NAME_PROMPT,
            validator: Box::new(MinLength {
                min: MIN_NAME_LENGTH,
                feedback: name_length_feedback(),
            }),
        }),
        DialogPhase::AwaitCity => Some(PromptSpec {
            id: "city_prompt",
            text: CITY_PROMPT,
            validator: Box::new(AcceptAll),
        }),
        DialogPhase::AwaitPhone => Some(PromptSpec {
            id: "phone_prompt",
            text: PHONE_PROMPT,
            validator: Box::new(AcceptAll),
        }),
        DialogPhase::Init | DialogPhase::Done => None,
    }
}
