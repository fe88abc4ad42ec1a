use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use sn_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::*;

/// Storage backends selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Open the requested backend. `database` is the SQLite file path and is
/// ignored by the in-memory backend.
pub async fn create_storage(kind: StorageKind, database: &str) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        #[cfg(feature = "sqlite")]
        StorageKind::Sqlite => {
            let storage = SQLiteStorage::new_with_path(database).await?;
            Ok(Arc::new(storage))
        }
        #[cfg(not(feature = "sqlite"))]
        StorageKind::Sqlite => {
            let _ = database;
            Err(Error::Storage("Built without the sqlite feature".to_string()))
        }
        StorageKind::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageKind};
}
