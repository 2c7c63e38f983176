//! 统一的应用状态。

use std::sync::Arc;

use mercado_core::store::DocumentStore;

use crate::repository::{
    ChatRepository, MessageRepository, ProductRepository, StoreChatRepository,
    StoreMessageRepository, StoreProductRepository, StoreUserRepository, UserRepository,
};

/// 统一的应用状态，包含所有路由共享的仓储。
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl AppState {
    /// 基于同一个存储句柄创建全部仓储。
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: Arc::new(StoreProductRepository::new(store.clone())),
            users: Arc::new(StoreUserRepository::new(store.clone())),
            chats: Arc::new(StoreChatRepository::new(store.clone())),
            messages: Arc::new(StoreMessageRepository::new(store)),
        }
    }
}
