//! Profile dialog — a short conversational flow that collects the user's
//! name, city, and phone number.
//!
//! The flow is an explicit phase machine (`state`) driven by
//! `ProfileDialog`. Each phase asks one question (`prompts`) unless the
//! field is already on the stored `UserProfile`, so a partially filled
//! profile resumes where it left off.

pub mod dialog;
pub mod model;
pub mod prompts;
pub mod routes;
pub mod state;

pub use dialog::{DialogStatus, DialogTurn, ProfileDialog, ProfileDialogBuilder};
pub use model::{UserProfile, capitalize};
pub use prompts::{PromptSpec, PromptValidator, Validation};
pub use routes::{ProfileRouteState, profile_routes};
pub use state::{DialogPhase, DialogState};
