//! 文档存储后端。

mod firebase;
mod memory;

use std::sync::Arc;

use anyhow::Context;
use mercado_core::store::DocumentStore;
use tracing::info;

pub use firebase::FirebaseStore;
pub use memory::MemoryStore;

use crate::config::{StoreBackend, StoreConfig};

/// 根据配置构建进程级共享的存储句柄。
pub fn connect(config: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Firebase => {
            let url = config.database_url.as_deref().context(
                "store.database_url (or DATABASE_URL) is required for the firebase backend",
            )?;
            let store = FirebaseStore::new(url, config.auth_token.clone())
                .with_context(|| format!("failed to configure document store at {url}"))?;
            info!(
                %url,
                authenticated = config.auth_token.is_some(),
                "using firebase document store"
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("using in-memory document store, data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
