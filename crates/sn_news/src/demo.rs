//! Canned articles used when the live provider yields nothing.

use chrono::{DateTime, Duration, Utc};
use sn_core::RawArticle;

const DEMO_SOURCE: &str = "demo-sports.com";

struct DemoArticle {
    uuid: &'static str,
    title: &'static str,
    description: &'static str,
    snippet: &'static str,
    slug: &'static str,
    image: &'static str,
    hours_ago: i64,
}

const DEMO_ARTICLES: [DemoArticle; 3] = [
    DemoArticle {
        uuid: "demo-1",
        title: "Local Football Team Wins Championship",
        description: "The hometown heroes defeated their rivals 3-1 in an exciting match.",
        snippet: "In a thrilling championship match, the local football team secured victory...",
        slug: "football-championship",
        image: "football",
        hours_ago: 0,
    },
    DemoArticle {
        uuid: "demo-2",
        title: "Basketball Season Kicks Off",
        description: "The new basketball season starts with high expectations.",
        snippet: "Teams are preparing for what promises to be an exciting basketball season...",
        slug: "basketball-season",
        image: "basketball",
        hours_ago: 2,
    },
    DemoArticle {
        uuid: "demo-3",
        title: "Tennis Tournament Results",
        description: "Latest results from the international tennis tournament.",
        snippet: "The tennis tournament concluded with surprising upsets and great matches...",
        slug: "tennis-results",
        image: "tennis",
        hours_ago: 4,
    },
];

pub fn demo_articles() -> Vec<RawArticle> {
    demo_articles_at(Utc::now())
}

/// Demo set with publication times staggered back from `now`.
pub fn demo_articles_at(now: DateTime<Utc>) -> Vec<RawArticle> {
    DEMO_ARTICLES
        .iter()
        .map(|demo| RawArticle {
            uuid: Some(demo.uuid.to_string()),
            title: Some(demo.title.to_string()),
            description: Some(demo.description.to_string()),
            snippet: Some(demo.snippet.to_string()),
            url: Some(format!("https://example.com/news/{}", demo.slug)),
            image_url: Some(format!("https://example.com/images/{}.jpg", demo.image)),
            source: Some(DEMO_SOURCE.to_string()),
            language: Some("en".to_string()),
            published_at: Some(
                (now - Duration::hours(demo.hours_ago))
                    .format("%Y-%m-%dT%H:%M:%S%.6fZ")
                    .to_string(),
            ),
            categories: vec!["sports".to_string()],
        })
        .collect()
}
