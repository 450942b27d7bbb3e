//! # Gateway Types
//!
//! Wire schemas for the news service. Everything the gateway hands back has
//! been decoded into one of these types and checked with `validate()`, so
//! the rest of the crate never sees a half-filled payload.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::client::GatewayError;

/// Server-side default for the `limit` parameter. Requests at this size omit it.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sentinel key for "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// ============================================================================
// Articles
// ============================================================================

/// A news article as served by `/news` and `/news/{id}`.
///
/// The service stores cleaned items with `null` title or content, so both
/// decode to an empty string. `title` must still be present as a key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Decodes `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Article {
    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => "(untitled)",
            title => title,
        }
    }

    /// Rejects articles that decoded but cannot be addressed or linked.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.id.trim().is_empty() {
            return Err(GatewayError::Decode("article has an empty id".to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(GatewayError::Decode(format!(
                "article {} has an empty url",
                self.id
            )));
        }
        Ok(())
    }
}

/// Body for `POST /news`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub publish_time: Option<String>,
    pub author: Option<String>,
    pub source: String,
    pub url: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Body for `PUT /news/{id}`. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// ============================================================================
// Categories
// ============================================================================

/// A node of the category tree served by `/categories/tree`.
///
/// Children are owned, so a tree built from JSON is always finite and acyclic.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.name.is_empty() {
            return Err(GatewayError::Decode(format!(
                "category {} has an empty name",
                self.id
            )));
        }
        self.children.iter().try_for_each(CategoryNode::validate)
    }
}

/// Flat category record served by `/categories` and `/categories/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Body for `POST /categories`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Which articles a list request asks for: everything, or one category by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Builds a filter from a user-facing key. `"all"` and blank keys mean no filter.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(key.to_string())
        }
    }

    pub fn as_key(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Named(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

// ============================================================================
// List Query
// ============================================================================

/// Parameters of `GET /news`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub category: CategoryFilter,
    pub page: u32,
    pub page_size: u32,
    pub search: String,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

impl ArticleQuery {
    /// Query-string pairs, skipping every parameter that equals the server default.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let CategoryFilter::Named(name) = &self.category {
            params.push(("category", name.clone()));
        }
        if self.page > 1 {
            params.push(("page", self.page.to_string()));
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            params.push(("limit", self.page_size.to_string()));
        }
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        params
    }
}

// ============================================================================
// Processing & Health
// ============================================================================

/// Pipeline stage requested for a submitted URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessMode {
    #[default]
    Full,
    Collect,
    Parse,
    Clean,
}

impl ProcessMode {
    pub const ALL: [ProcessMode; 4] = [
        ProcessMode::Full,
        ProcessMode::Collect,
        ProcessMode::Parse,
        ProcessMode::Clean,
    ];

    /// Every mode is served by the same pipeline endpoint.
    pub fn endpoint(self) -> &'static str {
        match self {
            ProcessMode::Full | ProcessMode::Collect | ProcessMode::Parse | ProcessMode::Clean => {
                "/process-news"
            }
        }
    }

    pub fn next(self) -> Self {
        match self {
            ProcessMode::Full => ProcessMode::Collect,
            ProcessMode::Collect => ProcessMode::Parse,
            ProcessMode::Parse => ProcessMode::Clean,
            ProcessMode::Clean => ProcessMode::Full,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessMode::Full => "full",
            ProcessMode::Collect => "collect",
            ProcessMode::Parse => "parse",
            ProcessMode::Clean => "clean",
        }
    }
}

/// Body for `POST /process-news`.
#[derive(Debug, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    pub url: &'a str,
}

/// Reply of `POST /process-news`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessResult {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub saved_item: Option<serde_json::Value>,
    #[serde(default)]
    pub processing_steps: Vec<String>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub services: HashMap<String, String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// True when every backing service reported healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
