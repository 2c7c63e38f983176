use serde::{Deserialize, Serialize};

use super::{ChatId, MessageId, Timestamp, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub emisor_id: Option<UserId>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub contenido: Option<String>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub fecha_envio: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub chat_id: ChatId,
    pub emisor_id: UserId,
    pub contenido: String,
}

impl NewMessage {
    pub fn send(self, fecha_envio: Timestamp) -> Message {
        Message {
            chat_id: Some(self.chat_id),
            emisor_id: Some(self.emisor_id),
            contenido: Some(self.contenido),
            fecha_envio: Some(fecha_envio),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: MessageId,
    pub message: Message,
}

/// Keeps the messages of one chat, oldest first. Messages without a readable
/// send date go last. Ties keep their input order.
pub fn conversation(records: Vec<MessageRecord>, chat_id: &ChatId) -> Vec<MessageRecord> {
    let mut selected: Vec<MessageRecord> = records
        .into_iter()
        .filter(|record| record.message.chat_id.as_ref() == Some(chat_id))
        .collect();
    selected.sort_by_key(|record| {
        let sent = record.message.fecha_envio;
        (sent.is_none(), sent)
    });
    selected
}
