//! Local dataset used when the news service is unreachable at startup.

use crate::gateway::{Article, CategoryNode};

pub fn fallback_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".to_string(),
            title: "Baidu releases new AI product".to_string(),
            content: "Baidu today released its latest artificial intelligence product, \
                drawing wide attention across the industry. The product is built on recent \
                deep learning work and marks a major step forward in natural language processing."
                .to_string(),
            category: Some("Tech".to_string()),
            publish_time: Some("2024-01-15 10:00:00".to_string()),
            author: Some("Zhang San".to_string()),
            source: "baidu.com".to_string(),
            url: "https://www.baidu.com/news/1".to_string(),
            tags: vec![
                "AI".to_string(),
                "Baidu".to_string(),
                "Artificial Intelligence".to_string(),
            ],
        },
        Article {
            id: "2".to_string(),
            title: "Tech industry sees new breakthrough".to_string(),
            content: "New research shows the technology industry has made major progress in \
                artificial intelligence. Several companies announced advances in machine learning \
                and computer vision."
                .to_string(),
            category: Some("Tech".to_string()),
            publish_time: Some("2024-01-14 15:30:00".to_string()),
            author: Some("Li Si".to_string()),
            source: "tech.sina.com".to_string(),
            url: "https://tech.sina.com/news/2".to_string(),
            tags: vec![
                "Tech".to_string(),
                "Breakthrough".to_string(),
                "AI".to_string(),
            ],
        },
    ]
}

pub fn fallback_categories() -> Vec<CategoryNode> {
    vec![
        CategoryNode {
            id: "1".to_string(),
            name: "Tech".to_string(),
            children: vec![
                CategoryNode::leaf("5", "Artificial Intelligence"),
                CategoryNode::leaf("6", "Blockchain"),
            ],
        },
        CategoryNode::leaf("2", "Finance"),
        CategoryNode::leaf("3", "Sports"),
        CategoryNode::leaf("4", "Entertainment"),
    ]
}
