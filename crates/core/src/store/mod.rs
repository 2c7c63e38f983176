//! Abstract document store: path-addressed JSON values with store-generated keys.

mod error;
mod path;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use error::StoreError;
pub use path::{Collection, StorePath};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `None` when nothing is stored at `path`.
    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError>;

    /// Stores `value` under a new child of `path` and returns the generated key.
    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError>;

    /// Merges top-level `fields` into the object at `path`.
    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError>;

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError>;
}
