//! Firebase Realtime Database 存储实现。
//!
//! 通过 REST 协议访问远端数据库：每个路径对应 `{base}/{path}.json`。

use async_trait::async_trait;
use mercado_core::store::{DocumentStore, StoreError, StorePath};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// push 请求的响应体，`name` 为新生成的键。
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// 远端文档存储客户端。进程启动时创建一次，所有请求共享。
#[derive(Debug, Clone)]
pub struct FirebaseStore {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl FirebaseStore {
    /// 创建客户端。`base_url` 必须是 http(s) 绝对地址。
    pub fn new(base_url: &str, auth_token: Option<String>) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            StoreError::Transport(format!("invalid database url '{base_url}': {err}"))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(StoreError::Transport(format!(
                "database url must be an http(s) address: {base_url}"
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            auth_token,
        })
    }

    fn endpoint(&self, path: &StorePath) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match path.segments().split_last() {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{last}.json"));
                }
                None => {
                    segments.push(".json");
                }
            }
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DocumentStore for FirebaseStore {
    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        debug!(%path, "reading from document store");
        let response = self.send(self.client.get(self.endpoint(path))).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;

        Ok((!value.is_null()).then_some(value))
    }

    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        debug!(%path, "pushing to document store");
        let response = self
            .send(self.client.post(self.endpoint(path)).json(&value))
            .await?;
        let created: PushResponse = response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;

        Ok(created.name)
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError> {
        debug!(%path, fields = fields.len(), "updating document store");
        self.send(self.client.patch(self.endpoint(path)).json(&fields))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError> {
        debug!(%path, "deleting from document store");
        self.send(self.client.delete(self.endpoint(path))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mercado_core::store::Collection;

    use super::*;

    #[test]
    fn endpoint_appends_json_suffix_to_record_path() {
        let store = FirebaseStore::new("https://demo.firebaseio.com", None).expect("valid url");
        let path = StorePath::record(Collection::Products, "-Nabc").expect("valid key");

        assert_eq!(
            store.endpoint(&path).as_str(),
            "https://demo.firebaseio.com/productos/-Nabc.json"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let store =
            FirebaseStore::new("http://localhost:9000/mercado/", None).expect("valid url");
        let path = StorePath::collection(Collection::Messages);

        assert_eq!(
            store.endpoint(&path).as_str(),
            "http://localhost:9000/mercado/mensaje.json"
        );
    }

    #[test]
    fn endpoint_percent_encodes_keys() {
        let store = FirebaseStore::new("https://demo.firebaseio.com", None).expect("valid url");
        let path = StorePath::record(Collection::Users, "ana pérez").expect("valid key");

        assert_eq!(
            store.endpoint(&path).as_str(),
            "https://demo.firebaseio.com/usuarios/ana%20p%C3%A9rez.json"
        );
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(FirebaseStore::new("ftp://demo.firebaseio.com", None).is_err());
        assert!(FirebaseStore::new("not a url", None).is_err());
    }
}
