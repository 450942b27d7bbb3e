pub mod client;
pub mod http;
pub mod types;

pub use client::{GatewayError, NewsGateway};
pub use http::{DEFAULT_BASE_URL, HttpGateway};
pub use types::{
    ALL_CATEGORIES, Article, ArticleQuery, ArticleUpdate, Category, CategoryFilter, CategoryNode,
    DEFAULT_PAGE_SIZE, HealthStatus, NewArticle, NewCategory, ProcessMode, ProcessResult,
};
