use serde::{Deserialize, Serialize};

use super::{ChatId, ProductId, Timestamp, UserId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<ProductId>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub ofertante_id: Option<UserId>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub interesado_id: Option<UserId>,
    #[serde(default, deserialize_with = "super::lenient::field", skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<Timestamp>,
}

impl Chat {
    /// Whether the user takes part in the chat, as offerer or as interested party.
    pub fn involves(&self, user_id: &UserId) -> bool {
        self.ofertante_id.as_ref() == Some(user_id) || self.interesado_id.as_ref() == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub producto_id: ProductId,
    pub ofertante_id: UserId,
    pub interesado_id: UserId,
}

impl NewChat {
    pub fn open(self, fecha_creacion: Timestamp) -> Chat {
        Chat {
            producto_id: Some(self.producto_id),
            ofertante_id: Some(self.ofertante_id),
            interesado_id: Some(self.interesado_id),
            fecha_creacion: Some(fecha_creacion),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub id: ChatId,
    pub chat: Chat,
}
