//! Routes channel messages into the profile dialog.

use std::sync::Arc;

use futures::StreamExt;

use crate::channels::{Channel, IncomingMessage, OutgoingResponse};
use crate::error::Result;
use crate::profile::{DialogTurn, ProfileDialog, UserProfile};

/// Drives one channel against one `ProfileDialog`.
pub struct ProfileBot {
    dialog: Arc<ProfileDialog>,
    channel: Box<dyn Channel>,
    seed: Option<UserProfile>,
}

impl ProfileBot {
    pub fn new(dialog: Arc<ProfileDialog>, channel: Box<dyn Channel>) -> Self {
        Self {
            dialog,
            channel,
            seed: None,
        }
    }

    /// Initial values used when a conversation has no stored profile yet.
    pub fn with_seed(mut self, seed: UserProfile) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Answer the pending prompt, or start the dialog if none is pending.
    pub async fn handle_message(&self, message: &IncomingMessage) -> Result<DialogTurn> {
        let conversation = message.conversation_key();
        let turn = if self.dialog.is_active(&conversation).await? {
            self.dialog.resume(&conversation, &message.content).await?
        } else {
            self.dialog.begin(&conversation, self.seed.clone()).await?
        };
        Ok(turn)
    }

    /// Process messages until the channel closes or Ctrl+C.
    pub async fn run(self) -> Result<()> {
        let mut message_stream = self.channel.start().await?;
        tracing::info!(
            channel = self.channel.name(),
            dialog = self.dialog.dialog_id(),
            "Profile bot ready and listening"
        );

        loop {
            let message = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received, shutting down...");
                    break;
                }
                msg = message_stream.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            tracing::info!("Channel stream ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            match self.handle_message(&message).await {
                Ok(turn) => {
                    for text in turn.messages {
                        if let Err(e) = self
                            .channel
                            .respond(&message, OutgoingResponse::text(text))
                            .await
                        {
                            tracing::error!("Failed to send reply: {}", e);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Error handling message: {}", e);
                    let _ = self
                        .channel
                        .respond(&message, OutgoingResponse::text(format!("Error: {}", e)))
                        .await;
                }
            }
        }

        self.channel.shutdown().await?;
        Ok(())
    }
}
