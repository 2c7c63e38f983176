//! Store-backed repositories, one per collection.

mod chat_repository;
mod documents;
mod message_repository;
mod product_repository;
mod user_repository;

pub use chat_repository::{ChatRepository, StoreChatRepository};
pub use message_repository::{MessageRepository, StoreMessageRepository};
pub use product_repository::{ProductRepository, StoreProductRepository};
pub use user_repository::{StoreUserRepository, UserRepository};
