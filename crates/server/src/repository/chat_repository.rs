use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mercado_core::domain::{Chat, ChatId, ChatRecord, NewChat, Timestamp, UserId};
use mercado_core::store::{Collection, DocumentStore};

use super::documents::Documents;

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create(&self, new_chat: NewChat) -> Result<ChatRecord>;
    /// Chats where the user is offerer or interested party.
    /// `None` when no chat has ever been stored.
    async fn list_by_participant(&self, user_id: &UserId) -> Result<Option<Vec<ChatRecord>>>;
    async fn delete(&self, chat_id: &ChatId) -> Result<bool>;
}

pub struct StoreChatRepository {
    documents: Documents<Chat>,
}

impl StoreChatRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents: Documents::new(store, Collection::Chats),
        }
    }
}

#[async_trait]
impl ChatRepository for StoreChatRepository {
    async fn create(&self, new_chat: NewChat) -> Result<ChatRecord> {
        let chat = new_chat.open(Timestamp::now());
        let key = self.documents.insert(&chat).await?;

        Ok(ChatRecord {
            id: ChatId::from(key),
            chat,
        })
    }

    async fn list_by_participant(&self, user_id: &UserId) -> Result<Option<Vec<ChatRecord>>> {
        let entries = self.documents.all().await?;
        Ok(entries.map(|entries| {
            entries
                .into_iter()
                .filter(|(_, chat)| chat.involves(user_id))
                .map(|(key, chat)| ChatRecord {
                    id: ChatId::from(key),
                    chat,
                })
                .collect()
        }))
    }

    async fn delete(&self, chat_id: &ChatId) -> Result<bool> {
        self.documents.remove(chat_id.as_str()).await
    }
}
