//! User profile data model.

use serde::{Deserialize, Serialize};

/// The three-field record filled in by the profile dialog.
///
/// Stored through the state accessor as JSON under `settings_keys::USER_PROFILE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Whether every field has been collected.
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.city.is_some() && self.phone.is_some()
    }

    /// Render the closing message shown when the dialog finishes.
    pub fn summary(&self) -> String {
        format!(
            "Thanks! Your name is {}, you live in {} and your phone number is {}.",
            self.name.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default(),
            self.phone.as_deref().unwrap_or_default(),
        )
    }
}

/// Uppercase the first character and keep the rest as typed.
///
/// Not title case: `"new york"` becomes `"New york"`.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Settings keys used for dialog persistence.
pub mod settings_keys {
    /// Key for the UserProfile JSON blob.
    pub const USER_PROFILE: &str = "user_profile";
    /// Suffix appended to the dialog id for the DialogState JSON blob.
    pub const DIALOG_STATE_SUFFIX: &str = "state";
}
