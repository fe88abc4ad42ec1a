pub mod client;
pub mod demo;
pub mod relevance;

pub use client::TheNewsApiClient;
pub use demo::demo_articles;
pub use relevance::is_sports_related;

pub mod prelude {
    pub use super::client::TheNewsApiClient;
    pub use super::demo::demo_articles;
    pub use sn_core::{NewsProvider, RawArticle, Result, Error};
}
