//! 进程内文档存储。
//!
//! 以 JSON 树保存全部数据，供测试和本地开发使用。

use async_trait::async_trait;
use mercado_core::store::{DocumentStore, StoreError, StorePath};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

/// 内存文档存储。空节点视为不存在，与远端数据库一致。
#[derive(Debug, Default)]
pub struct MemoryStore {
    root: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已有数据创建存储（键为集合名）。
    pub fn with_data(data: Map<String, Value>) -> Self {
        Self {
            root: RwLock::new(data),
        }
    }

    /// 取得路径对应的对象，沿途缺失或非对象的节点会被替换为空对象。
    fn object_at<'a>(
        root: &'a mut Map<String, Value>,
        path: &StorePath,
    ) -> &'a mut Map<String, Value> {
        let mut node = root;
        for segment in path.segments() {
            let entry = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            index_array(entry);
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => unreachable!("entry was just replaced with an object"),
            };
        }
        node
    }

    /// 删除 `segments` 指向的节点，并清理因此变空的父节点。
    fn remove(node: &mut Map<String, Value>, segments: &[String]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() {
            node.remove(first);
            return;
        }

        let now_empty = match node.get_mut(first) {
            Some(child) => {
                index_array(child);
                match child {
                    Value::Object(child) => {
                        Self::remove(child, rest);
                        child.is_empty()
                    }
                    _ => false,
                }
            }
            None => false,
        };

        if now_empty {
            node.remove(first);
        }
    }
}

/// 整数键的集合会以数组形式返回，下标即键。
fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

/// 写入前把数组节点还原为以下标为键的对象，空位不保留。
fn index_array(node: &mut Value) {
    if let Value::Array(items) = node {
        let indexed = std::mem::take(items)
            .into_iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(index, item)| (index.to_string(), item))
            .collect();
        *node = Value::Object(indexed);
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        let root = self.root.read().await;
        let mut segments = path.segments().iter();

        let Some(first) = segments.next() else {
            return Ok(Some(Value::Object(root.clone())));
        };

        let mut node = root.get(first);
        for segment in segments {
            node = node.and_then(|value| child(value, segment));
        }

        Ok(node.filter(|value| !is_absent(value)).cloned())
    }

    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        // v7 keys sort in creation order, like remote push ids.
        let key = Uuid::now_v7().simple().to_string();
        let mut root = self.root.write().await;

        if !is_absent(&value) {
            Self::object_at(&mut root, path).insert(key.clone(), value);
        }
        Ok(key)
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        let target = Self::object_at(&mut root, path);

        for (field, value) in fields {
            if is_absent(&value) {
                target.remove(&field);
            } else {
                target.insert(field, value);
            }
        }

        if target.is_empty() {
            Self::remove(&mut root, path.segments());
        }
        Ok(())
    }

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        Self::remove(&mut root, path.segments());
        Ok(())
    }
}
