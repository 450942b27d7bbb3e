use std::fmt;

use async_trait::async_trait;

use super::types::{
    Article, ArticleQuery, ArticleUpdate, Category, CategoryNode, HealthStatus, NewArticle,
    NewCategory, ProcessMode, ProcessResult,
};

/// Errors that can occur while talking to the news service.
/// The gateway never retries; callers decide what a failure means.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Network-level failure (timeout, DNS, connection refused).
    Transport(String),
    /// The service answered outside the 2xx range.
    Status { status: u16, message: String },
    /// The reply was not the JSON we expected.
    Decode(String),
}

impl GatewayError {
    /// HTTP status carried by the error, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(msg) => write!(f, "transport error: {msg}"),
            GatewayError::Status { status, message } => {
                write!(f, "HTTP error (status {status}): {message}")
            }
            GatewayError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Outbound calls to the news service.
#[async_trait]
pub trait NewsGateway: Send + Sync {
    /// Returns the name of the gateway, for logs.
    fn name(&self) -> &str;

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, GatewayError>;

    async fn get_article(&self, id: &str) -> Result<Article, GatewayError>;

    async fn create_article(&self, article: &NewArticle) -> Result<Article, GatewayError>;

    async fn update_article(
        &self,
        id: &str,
        update: &ArticleUpdate,
    ) -> Result<Article, GatewayError>;

    async fn delete_article(&self, id: &str) -> Result<(), GatewayError>;

    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError>;

    async fn get_category_tree(&self) -> Result<Vec<CategoryNode>, GatewayError>;

    async fn get_category(&self, id: &str) -> Result<Category, GatewayError>;

    async fn create_category(&self, category: &NewCategory) -> Result<Category, GatewayError>;

    /// Hands a URL to the server-side collect/parse/clean pipeline.
    async fn submit_url_for_processing(
        &self,
        url: &str,
        mode: ProcessMode,
    ) -> Result<ProcessResult, GatewayError>;

    /// Liveness probe. Any 2xx reply counts as reachable.
    async fn health_check(&self) -> Result<HealthStatus, GatewayError>;
}
