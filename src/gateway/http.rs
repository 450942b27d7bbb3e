//! HTTP implementation of [`NewsGateway`] on top of reqwest.
//!
//! Paths are relative to a configured base URL. Bodies are JSON both ways.
//! Non-success statuses and transport failures are flattened into
//! [`GatewayError`] here and nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::{GatewayError, NewsGateway};
use super::types::{
    Article, ArticleQuery, ArticleUpdate, Category, CategoryNode, HealthStatus, NewArticle,
    NewCategory, ProcessMode, ProcessRequest, ProcessResult,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// News service gateway speaking HTTP/JSON.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            client: reqwest::Client::new(),
        }
    }

    /// Builds a gateway whose transport gives up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: normalize_base_url(base_url.into()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GatewayError> {
        self.execute(self.request(Method::GET, endpoint)).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        self.execute(self.request(method, endpoint).json(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response: {}", e);
            GatewayError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!("{} -> {}", response.url(), status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("News service error: {} - {}", status.as_u16(), message);
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Malformed payload ({} bytes): {}", bytes.len(), e);
            GatewayError::Decode(e.to_string())
        })
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[async_trait]
impl NewsGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>, GatewayError> {
        let params = query.params();
        debug!("GET /news params={:?}", params);

        let mut request = self.request(Method::GET, "/news");
        if !params.is_empty() {
            request = request.query(&params);
        }
        let articles: Vec<Article> = self.execute(request).await?;
        articles.iter().try_for_each(Article::validate)?;

        info!("Fetched {} articles (page {})", articles.len(), query.page);
        Ok(articles)
    }

    async fn get_article(&self, id: &str) -> Result<Article, GatewayError> {
        let article: Article = self.get(&format!("/news/{id}")).await?;
        article.validate()?;
        Ok(article)
    }

    async fn create_article(&self, article: &NewArticle) -> Result<Article, GatewayError> {
        let created: Article = self.send(Method::POST, "/news", article).await?;
        created.validate()?;
        info!("Created article {}", created.id);
        Ok(created)
    }

    async fn update_article(
        &self,
        id: &str,
        update: &ArticleUpdate,
    ) -> Result<Article, GatewayError> {
        let updated: Article = self
            .send(Method::PUT, &format!("/news/{id}"), update)
            .await?;
        updated.validate()?;
        Ok(updated)
    }

    async fn delete_article(&self, id: &str) -> Result<(), GatewayError> {
        // The reply is a confirmation message we have no use for
        let _: serde_json::Value = self
            .execute(self.request(Method::DELETE, &format!("/news/{id}")))
            .await?;
        info!("Deleted article {}", id);
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.get("/categories").await
    }

    async fn get_category_tree(&self) -> Result<Vec<CategoryNode>, GatewayError> {
        let tree: Vec<CategoryNode> = self.get("/categories/tree").await?;
        tree.iter().try_for_each(CategoryNode::validate)?;
        debug!("Fetched category tree with {} roots", tree.len());
        Ok(tree)
    }

    async fn get_category(&self, id: &str) -> Result<Category, GatewayError> {
        self.get(&format!("/categories/{id}")).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category, GatewayError> {
        self.send(Method::POST, "/categories", category).await
    }

    async fn submit_url_for_processing(
        &self,
        url: &str,
        mode: ProcessMode,
    ) -> Result<ProcessResult, GatewayError> {
        info!("Submitting {} for processing (mode={})", url, mode.label());
        let result: ProcessResult = self
            .send(Method::POST, mode.endpoint(), &ProcessRequest { url })
            .await?;
        debug!(
            "Processing finished: success={}, saved={}, steps={:?}",
            result.success, result.saved, result.processing_steps
        );
        Ok(result)
    }

    async fn health_check(&self) -> Result<HealthStatus, GatewayError> {
        self.get("/health").await
    }
}
