//! End-to-end tests for the profile dialog, driven through the bot loop
//! with a scripted channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;
use tokio::time::timeout;

use profile_bot::bot::ProfileBot;
use profile_bot::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse};
use profile_bot::error::ChannelError;
use profile_bot::profile::prompts::{CITY_PROMPT, NAME_PROMPT, PHONE_PROMPT, name_length_feedback};
use profile_bot::profile::{DialogPhase, ProfileDialog, UserProfile};
use profile_bot::store::{LibSqlStore, MemoryStore, SettingsStore};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Channel that replays fixed inputs and records every reply.
struct ScriptedChannel {
    inputs: Vec<String>,
    replies: Arc<Mutex<Vec<String>>>,
}

impl ScriptedChannel {
    fn new(inputs: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let replies = Arc::new(Mutex::new(Vec::new()));
        let channel = Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            replies: Arc::clone(&replies),
        };
        (channel, replies)
    }
}

#[async_trait]
impl Channel for ScriptedChannel {
    fn name(&self) -> &str {
        "script"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let messages: Vec<IncomingMessage> = self
            .inputs
            .iter()
            .map(|text| IncomingMessage::new("script", "tester", text))
            .collect();
        Ok(Box::pin(stream::iter(messages)))
    }

    async fn respond(
        &self,
        _msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        self.replies.lock().await.push(response.content);
        Ok(())
    }
}

fn dialog_with(store: Arc<dyn SettingsStore>) -> Arc<ProfileDialog> {
    Arc::new(
        ProfileDialog::builder()
            .dialog_id("user_profile")
            .store(store)
            .build()
            .unwrap(),
    )
}

async fn run_script(dialog: Arc<ProfileDialog>, inputs: &[&str]) -> Vec<String> {
    run_seeded_script(dialog, None, inputs).await
}

async fn run_seeded_script(
    dialog: Arc<ProfileDialog>,
    seed: Option<UserProfile>,
    inputs: &[&str],
) -> Vec<String> {
    let (channel, replies) = ScriptedChannel::new(inputs);
    let mut bot = ProfileBot::new(dialog, Box::new(channel));
    if let Some(seed) = seed {
        bot = bot.with_seed(seed);
    }
    timeout(TEST_TIMEOUT, bot.run())
        .await
        .expect("bot run timed out")
        .unwrap();
    let replies = replies.lock().await.clone();
    replies
}

#[tokio::test]
async fn empty_profile_full_conversation() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    let replies = run_script(Arc::clone(&dialog), &["hi", "bob", "seoul", "5551234"]).await;

    let expected_summary = UserProfile::new()
        .with_name("Bob")
        .with_city("Seoul")
        .with_phone("5551234")
        .summary();
    assert_eq!(
        replies,
        vec![
            NAME_PROMPT.to_string(),
            CITY_PROMPT.to_string(),
            PHONE_PROMPT.to_string(),
            expected_summary.clone(),
        ]
    );
    assert!(expected_summary.contains("Bob"));
    assert!(expected_summary.contains("Seoul"));
    assert!(expected_summary.contains("5551234"));

    let status = dialog.status("script:tester").await.unwrap();
    assert!(!status.active);
}

#[tokio::test]
async fn invalid_names_reprompt_until_valid() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    let replies = run_script(dialog, &["hi", "", "x", " y ", "al"]).await;

    let mut expected = vec![NAME_PROMPT.to_string()];
    for _ in 0..3 {
        expected.push(name_length_feedback());
        expected.push(NAME_PROMPT.to_string());
    }
    expected.push(CITY_PROMPT.to_string());
    assert_eq!(replies, expected);
}

#[tokio::test]
async fn complete_profile_jumps_to_summary() {
    let store: Arc<dyn SettingsStore> = Arc::new(MemoryStore::new());
    let dialog = dialog_with(store);
    let profile = UserProfile::new()
        .with_name("Alice")
        .with_city("Paris")
        .with_phone("123");

    let turn = dialog
        .begin("script:tester", Some(profile.clone()))
        .await
        .unwrap();
    assert!(turn.is_complete());
    assert_eq!(turn.messages, vec![profile.summary()]);

    // A later message restarts the dialog, which again has nothing to ask.
    let replies = run_script(dialog, &["hello again"]).await;
    assert_eq!(replies, vec![profile.summary()]);
}

#[tokio::test]
async fn name_only_profile_resumes_at_city() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    let turn = dialog
        .begin("script:tester", Some(UserProfile::new().with_name("Alice")))
        .await
        .unwrap();
    assert_eq!(turn.phase, DialogPhase::AwaitCity);
    assert_eq!(turn.messages, vec![CITY_PROMPT]);
}

#[tokio::test]
async fn seeded_bot_skips_known_answers() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    let seed = UserProfile::new().with_name("Alice");
    let replies = run_seeded_script(Arc::clone(&dialog), Some(seed), &["hi", "paris", "123"]).await;

    let expected_summary = UserProfile::new()
        .with_name("Alice")
        .with_city("Paris")
        .with_phone("123")
        .summary();
    assert_eq!(
        replies,
        vec![
            CITY_PROMPT.to_string(),
            PHONE_PROMPT.to_string(),
            expected_summary,
        ]
    );
    assert!(!dialog.is_active("script:tester").await.unwrap());
}

#[tokio::test]
async fn answers_are_capitalized_not_title_cased() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    dialog.begin("c", None).await.unwrap();
    dialog.resume("c", "alice").await.unwrap();
    dialog.resume("c", "new york").await.unwrap();
    let turn = dialog.resume("c", "+1 555").await.unwrap();

    assert_eq!(turn.profile.name.as_deref(), Some("Alice"));
    assert_eq!(turn.profile.city.as_deref(), Some("New york"));
    assert_eq!(turn.profile.phone.as_deref(), Some("+1 555"));
}

#[tokio::test]
async fn conversations_do_not_share_state() {
    let dialog = dialog_with(Arc::new(MemoryStore::new()));
    dialog.begin("cli:a", None).await.unwrap();
    dialog.begin("cli:b", None).await.unwrap();

    dialog.resume("cli:a", "anna").await.unwrap();
    let b = dialog.resume("cli:b", "ben").await.unwrap();

    assert_eq!(b.profile.name.as_deref(), Some("Ben"));
    let a = dialog.status("cli:a").await.unwrap();
    assert_eq!(a.profile.unwrap().name.as_deref(), Some("Anna"));
}

#[tokio::test]
async fn dialog_resumes_across_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile-bot.db");

    {
        let store: Arc<dyn SettingsStore> = Arc::new(LibSqlStore::new_local(&path).await.unwrap());
        let dialog = dialog_with(store);
        dialog.begin("cli:a", None).await.unwrap();
        dialog.resume("cli:a", "bob").await.unwrap();
    }

    let store: Arc<dyn SettingsStore> = Arc::new(LibSqlStore::new_local(&path).await.unwrap());
    let dialog = dialog_with(store);
    assert!(dialog.is_active("cli:a").await.unwrap());

    let turn = dialog.resume("cli:a", "seoul").await.unwrap();
    assert_eq!(turn.messages, vec![PHONE_PROMPT]);
    assert_eq!(turn.profile.name.as_deref(), Some("Bob"));
    assert_eq!(turn.profile.city.as_deref(), Some("Seoul"));
}
