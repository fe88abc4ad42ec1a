pub mod error;
pub mod providers;
pub mod storage;
pub mod time;
pub mod types;

pub use error::{Error, Result};
pub use providers::{NewsProvider, TranslationProvider};
pub use storage::ArticleStore;
pub use types::{
    Article, ArticleQuery, ArticleStats, InsertOutcome, NewArticle, Page, RawArticle,
    TranslatedFields, TranslationUpdate, DEFAULT_CATEGORY, DEFAULT_LANGUAGE,
};
