use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mercado_core::domain::{
    ChatId, Message, MessageId, MessageRecord, NewMessage, Timestamp, conversation,
};
use mercado_core::store::{Collection, DocumentStore};

use super::documents::Documents;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, new_message: NewMessage) -> Result<MessageRecord>;
    /// Messages of one chat, oldest first. `None` when no message has ever been stored.
    async fn list_by_chat(&self, chat_id: &ChatId) -> Result<Option<Vec<MessageRecord>>>;
}

pub struct StoreMessageRepository {
    documents: Documents<Message>,
}

impl StoreMessageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: Documents::new(store, Collection::Messages),
        }
    }
}

#[async_trait]
impl MessageRepository for StoreMessageRepository {
    async fn create(&self, new_message: NewMessage) -> Result<MessageRecord> {
        let message = new_message.send(Timestamp::now());
        let key = self.documents.insert(&message).await?;

        Ok(MessageRecord {
            id: MessageId::from(key),
            message,
        })
    }

    async fn list_by_chat(&self, chat_id: &ChatId) -> Result<Option<Vec<MessageRecord>>> {
        let entries = self.documents.all().await?;
        Ok(entries.map(|entries| {
            let records = entries
                .into_iter()
                .map(|(key, message)| MessageRecord {
                    id: MessageId::from(key),
                    message,
                })
                .collect();
            conversation(records, chat_id)
        }))
    }
}
