use std::fmt;

/// Root paths of the four record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Users,
    Chats,
    Messages,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Products => "productos",
            Collection::Users => "usuarios",
            Collection::Chats => "chats",
            // Existing message data lives under the singular root.
            Collection::Messages => "mensaje",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `/`-separated location in the store. Every segment is a valid key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn collection(collection: Collection) -> Self {
        Self {
            segments: vec![collection.as_str().to_string()],
        }
    }

    /// Path of one record, or `None` when `key` can never name a stored record.
    pub fn record(collection: Collection, key: &str) -> Option<Self> {
        Self::collection(collection).child(key)
    }

    pub fn child(&self, key: &str) -> Option<Self> {
        if !is_valid_key(key) {
            return None;
        }

        let mut segments = self.segments.clone();
        segments.push(key.to_string());
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| matches!(c, '.' | '$' | '#' | '[' | ']' | '/') || c.is_ascii_control())
}
