use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use mercado_core::store::{Collection, DocumentStore, StorePath};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Typed access to one collection of the document store.
pub(crate) struct Documents<T> {
    store: Arc<dyn DocumentStore>,
    collection: Collection,
    _document: PhantomData<fn() -> T>,
}

impl<T> Documents<T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: Arc<dyn DocumentStore>, collection: Collection) -> Self {
        Self {
            store,
            collection,
            _document: PhantomData,
        }
    }

    pub(crate) async fn insert(&self, document: &T) -> Result<String> {
        let value = serde_json::to_value(document)
            .with_context(|| format!("failed to encode {} document", self.collection))?;
        let key = self
            .store
            .push(&StorePath::collection(self.collection), value)
            .await?;
        Ok(key)
    }

    /// Every decodable document with its key, or `None` if the collection is absent.
    /// Entries that are not documents at all are skipped.
    pub(crate) async fn all(&self) -> Result<Option<Vec<(String, T)>>> {
        let Some(value) = self
            .store
            .read(&StorePath::collection(self.collection))
            .await?
        else {
            return Ok(None);
        };

        let entries: Vec<(String, Value)> = match value {
            Value::Object(map) => map.into_iter().collect(),
            // Integer-like keys may come back as a sparse array.
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, item)| !item.is_null())
                .map(|(index, item)| (index.to_string(), item))
                .collect(),
            other => {
                return Err(anyhow!(
                    "collection {} is not an object: {other}",
                    self.collection
                ));
            }
        };

        let documents: Vec<(String, T)> = entries
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(document) => Some((key, document)),
                Err(err) => {
                    warn!(collection = %self.collection, %key, error = %err, "skipping undecodable record");
                    None
                }
            })
            .collect();
        Ok(Some(documents))
    }

    pub(crate) async fn get(&self, key: &str) -> Result<Option<T>> {
        let Some(path) = StorePath::record(self.collection, key) else {
            return Ok(None);
        };
        let Some(value) = self.store.read(&path).await? else {
            return Ok(None);
        };

        let document = serde_json::from_value(value)
            .with_context(|| format!("invalid {path} document in store"))?;
        Ok(Some(document))
    }

    /// Merges `changes` into an existing record and returns the merged document.
    /// Returns `None` without touching the store when the record does not exist.
    pub(crate) async fn merge<C: Serialize>(&self, key: &str, changes: &C) -> Result<Option<T>> {
        let Some(path) = StorePath::record(self.collection, key) else {
            return Ok(None);
        };
        let fields = match serde_json::to_value(changes)? {
            Value::Object(fields) => fields,
            other => return Err(anyhow!("change set for {path} is not an object: {other}")),
        };
        let Some(current) = self.store.read(&path).await? else {
            return Ok(None);
        };

        // A non-object record is replaced by the change set, as a remote PATCH would do.
        let mut merged = match current {
            Value::Object(document) => document,
            _ => Map::new(),
        };
        merged.extend(fields.clone());

        self.store.update(&path, fields).await?;
        let document = serde_json::from_value(Value::Object(merged))
            .with_context(|| format!("invalid merged {path} document"))?;
        Ok(Some(document))
    }

    /// Deletes a record. Returns `false` without touching the store when it does not exist.
    pub(crate) async fn remove(&self, key: &str) -> Result<bool> {
        let Some(path) = StorePath::record(self.collection, key) else {
            return Ok(false);
        };
        if self.store.read(&path).await?.is_none() {
            return Ok(false);
        }

        self.store.delete(&path).await?;
        Ok(true)
    }
}
