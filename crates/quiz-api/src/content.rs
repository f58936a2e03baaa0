//! Stored course content addressable by id

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A piece of stored text quizzes can be generated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub body: String,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Text handed to the generator: the title (if any) followed by the body
    pub fn corpus(&self) -> String {
        if self.title.trim().is_empty() {
            self.body.clone()
        } else {
            format!("{}\n\n{}", self.title.trim(), self.body)
        }
    }
}

/// Lookup of content by id
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch(&self, id: &str) -> Option<ContentRecord>;
}

/// Read-only store populated at startup
#[derive(Debug, Default, Clone)]
pub struct InMemoryContentStore {
    records: HashMap<String, ContentRecord>,
}

impl InMemoryContentStore {
    pub fn new(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn fetch(&self, id: &str) -> Option<ContentRecord> {
        self.records.get(id).cloned()
    }
}
