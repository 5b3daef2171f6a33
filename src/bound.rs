//! Client-bound entity handles.
//!
//! A [`Bound<T>`] pairs a hydrated entity with the [`Client`] that produced
//! it, so mutations can be expressed as methods on the entity itself. The
//! inner value is shared: cloning a handle clones the *reference*, and a
//! successful edit replaces the fields in place for every holder. After a
//! successful delete the handle's validity flag is cleared and every further
//! mutation fails; the flag never resets.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::client::Client;
use crate::entity::{
    Channel, CreateMessage, CreateWebhook, EditMessage, EditWebhook, Guild, Message, Webhook,
};
use crate::error::{Error, Result};

/// An entity tied to the client that fetched it.
#[derive(Debug, Clone)]
pub struct Bound<T> {
    client: Client,
    inner: Arc<Mutex<T>>,
    valid: Arc<AtomicBool>,
}

impl<T> Bound<T> {
    pub fn new(client: Client, value: T) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(value)),
            valid: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the underlying entity still exists as far as this handle
    /// knows. Cleared permanently by a successful delete.
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn ensure_valid(&self, what: &str) -> Result<()> {
        if !self.is_valid() {
            return Err(Error::InvalidEntity(format!("{what} was deleted")));
        }
        Ok(())
    }

    fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl<T: Clone> Bound<T> {
    /// A copy of the current entity value.
    pub async fn snapshot(&self) -> T {
        self.inner.lock().await.clone()
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

impl Bound<Message> {
    pub async fn id(&self) -> String {
        self.inner.lock().await.id.clone()
    }

    /// Edit the message. On success the fresh server response replaces the
    /// entity's fields in place, for every holder of this handle.
    pub async fn edit(&self, edit: &EditMessage) -> Result<()> {
        self.ensure_valid("message")?;
        let (channel_id, message_id) = {
            let message = self.inner.lock().await;
            (message.channel_id.clone(), message.id.clone())
        };
        let fresh = self
            .client
            .edit_message(&channel_id, &message_id, edit)
            .await?;
        *self.inner.lock().await = fresh;
        debug!(message_id, "message edited");
        Ok(())
    }

    /// Delete the message and invalidate this handle.
    pub async fn delete(&self) -> Result<()> {
        self.ensure_valid("message")?;
        let (channel_id, message_id) = {
            let message = self.inner.lock().await;
            (message.channel_id.clone(), message.id.clone())
        };
        self.client.delete_message(&channel_id, &message_id).await?;
        self.invalidate();
        debug!(message_id, "message deleted");
        Ok(())
    }

    /// Fetch the channel this message lives in.
    pub async fn channel(&self) -> Result<Bound<Channel>> {
        let channel_id = self.inner.lock().await.channel_id.clone();
        let channel = self.client.get_channel(&channel_id).await?;
        Ok(Bound::new(self.client.clone(), channel))
    }
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

impl Bound<Webhook> {
    pub async fn id(&self) -> String {
        self.inner.lock().await.id.clone()
    }

    /// Edit the webhook, replacing its fields in place on success. The new
    /// name (when given) is validated before any network I/O.
    pub async fn edit(&self, edit: &EditWebhook) -> Result<()> {
        self.ensure_valid("webhook")?;
        let webhook_id = self.inner.lock().await.id.clone();
        let fresh = self.client.edit_webhook(&webhook_id, edit).await?;
        *self.inner.lock().await = fresh;
        debug!(webhook_id, "webhook edited");
        Ok(())
    }

    /// Delete the webhook and invalidate this handle.
    pub async fn delete(&self) -> Result<()> {
        self.ensure_valid("webhook")?;
        let webhook_id = self.inner.lock().await.id.clone();
        self.client.delete_webhook(&webhook_id).await?;
        self.invalidate();
        debug!(webhook_id, "webhook deleted");
        Ok(())
    }

    /// Fetch the channel this webhook posts into.
    pub async fn channel(&self) -> Result<Bound<Channel>> {
        let channel_id = self.inner.lock().await.channel_id.clone();
        let channel = self.client.get_channel(&channel_id).await?;
        Ok(Bound::new(self.client.clone(), channel))
    }

    /// Fetch the guild this webhook belongs to, if it has one.
    pub async fn guild(&self) -> Result<Bound<Guild>> {
        let guild_id = self
            .inner
            .lock()
            .await
            .guild_id
            .clone()
            .ok_or_else(|| Error::Validation("webhook has no guild".into()))?;
        let guild = self.client.get_guild(&guild_id).await?;
        Ok(Bound::new(self.client.clone(), guild))
    }
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

impl Bound<Channel> {
    pub async fn id(&self) -> String {
        self.inner.lock().await.id.clone()
    }

    /// Post a message into the channel.
    ///
    /// Fails pre-flight when the channel cannot carry messages (voice,
    /// category, stage, directory) and when the body carries attachments —
    /// attachment upload is accepted by the schema but unsupported here.
    pub async fn post_message(&self, message: &CreateMessage) -> Result<Bound<Message>> {
        self.ensure_valid("channel")?;
        if message.attachments.is_some() {
            return Err(Error::NotImplemented(
                "message attachments are not supported".into(),
            ));
        }
        let channel_id = {
            let channel = self.inner.lock().await;
            if !channel.is_text_channel() {
                return Err(Error::Validation(format!(
                    "cannot post messages into a {:?} channel",
                    channel.kind
                )));
            }
            channel.id.clone()
        };
        let created = self.client.create_message(&channel_id, message).await?;
        Ok(Bound::new(self.client.clone(), created))
    }

    /// Create a webhook on the channel.
    pub async fn create_webhook(&self, webhook: &CreateWebhook) -> Result<Bound<Webhook>> {
        self.ensure_valid("channel")?;
        let channel_id = self.inner.lock().await.id.clone();
        let created = self.client.create_webhook(&channel_id, webhook).await?;
        Ok(Bound::new(self.client.clone(), created))
    }

    /// List the channel's webhooks.
    pub async fn webhooks(&self) -> Result<Vec<Bound<Webhook>>> {
        self.ensure_valid("channel")?;
        let channel_id = self.inner.lock().await.id.clone();
        let webhooks = self.client.channel_webhooks(&channel_id).await?;
        Ok(webhooks
            .into_iter()
            .map(|w| Bound::new(self.client.clone(), w))
            .collect())
    }
}
