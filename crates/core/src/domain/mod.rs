mod chat;
mod error;
mod ids;
mod lenient;
mod message;
mod product;
mod timestamp;
mod user;
mod validation;

pub use chat::{Chat, ChatRecord, NewChat};
pub use error::DomainError;
pub use ids::{ChatId, MessageId, ProductId, UserId};
pub use message::{Message, MessageRecord, NewMessage, conversation};
pub use product::{NewProduct, Product, ProductChanges, ProductRecord};
pub use timestamp::Timestamp;
pub use user::{NewUser, User, UserChanges, UserRecord};
pub use validation::{required, required_text};
