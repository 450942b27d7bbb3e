//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::state::App;
use crate::gateway::{
    Article, ArticleQuery, ArticleUpdate, Category, CategoryNode, GatewayError, HealthStatus,
    NewArticle, NewCategory, NewsGateway, ProcessMode, ProcessResult,
};

/// Builds a minimal valid article.
pub fn article(id: &str, category: &str) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Article {id}"),
        content: "Body".to_string(),
        category: Some(category.to_string()),
        publish_time: Some("2024-01-15 10:00:00".to_string()),
        author: Some("Reporter".to_string()),
        source: "example.com".to_string(),
        url: format!("https://example.com/news/{id}"),
        tags: vec!["tag".to_string()],
    }
}

/// Creates a test App with default settings.
pub fn test_app() -> App {
    App::default()
}

/// In-memory gateway with per-category canned replies and delays.
///
/// Every `list_articles` call is recorded so tests can inspect what was asked.
#[derive(Default)]
pub struct ScriptedGateway {
    pub healthy: bool,
    pub tree: Vec<CategoryNode>,
    /// Replies keyed by category key ("all" for no filter).
    pub articles: HashMap<String, Vec<Article>>,
    pub delays: HashMap<String, Duration>,
    pub process_fails: bool,
    pub queries: Mutex<Vec<ArticleQuery>>,
    pub health_calls: Mutex<u32>,
    pub processed: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn online() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self::default()
    }

    pub fn recorded_queries(&self) -> Vec<ArticleQuery> {
        self.queries.lock().unwrap().clone()
    }
}

fn not_found() -> GatewayError {
    GatewayError::Status {
        status: 404,
        message: "not found".to_string(),
    }
}

#[async_trait]
impl NewsGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, GatewayError> {
        self.queries.lock().unwrap().push(query.clone());
        let key = query.category.as_key().to_string();
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        Ok(self.articles.get(&key).cloned().unwrap_or_default())
    }

    async fn get_article(&self, id: &str) -> Result<Article, GatewayError> {
        self.articles
            .values()
            .flatten()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_article(&self, _article: &NewArticle) -> Result<Article, GatewayError> {
        Err(not_found())
    }

    async fn update_article(
        &self,
        _id: &str,
        _update: &ArticleUpdate,
    ) -> Result<Article, GatewayError> {
        Err(not_found())
    }

    async fn delete_article(&self, _id: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        Ok(Vec::new())
    }

    async fn get_category_tree(&self) -> Result<Vec<CategoryNode>, GatewayError> {
        if !self.healthy {
            return Err(GatewayError::Transport("connection refused".to_string()));
        }
        Ok(self.tree.clone())
    }

    async fn get_category(&self, _id: &str) -> Result<Category, GatewayError> {
        Err(not_found())
    }

    async fn create_category(&self, _category: &NewCategory) -> Result<Category, GatewayError> {
        Err(not_found())
    }

    async fn submit_url_for_processing(
        &self,
        url: &str,
        _mode: ProcessMode,
    ) -> Result<ProcessResult, GatewayError> {
        self.processed.lock().unwrap().push(url.to_string());
        if self.process_fails {
            return Err(GatewayError::Status {
                status: 500,
                message: "Processing failed".to_string(),
            });
        }
        Ok(ProcessResult {
            success: true,
            data: serde_json::Value::Null,
            saved: true,
            saved_item: None,
            processing_steps: vec!["collect".to_string(), "parse".to_string()],
        })
    }

    async fn health_check(&self) -> Result<HealthStatus, GatewayError> {
        *self.health_calls.lock().unwrap() += 1;
        if self.healthy {
            Ok(HealthStatus {
                status: "healthy".to_string(),
                services: HashMap::new(),
                timestamp: None,
            })
        } else {
            Err(GatewayError::Transport("connection refused".to_string()))
        }
    }
}
