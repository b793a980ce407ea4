use std::path::Path;
use std::sync::Arc;
use fnd_core::{Error, Result, ResultStorage};
use tracing::info;

pub mod backends;
pub mod export;

pub use backends::*;

/// Storage backends selectable from the command line.
pub const AVAILABLE_BACKENDS: &[&str] = &["sqlite", "memory"];

pub async fn create_storage(kind: &str, database_path: &Path) -> Result<Arc<dyn ResultStorage>> {
    let storage: Arc<dyn ResultStorage> = match kind.trim().to_lowercase().as_str() {
        "memory" => Arc::new(MemoryStorage::new()),
        #[cfg(feature = "sqlite")]
        "sqlite" => Arc::new(SqliteStorage::new_with_path(database_path).await?),
        other => {
            return Err(Error::Config(format!(
                "Unknown storage backend '{}'. Available backends: {}",
                other,
                AVAILABLE_BACKENDS.join(", ")
            )))
        }
    };
    info!("💾 Storage ready ({}, {})", kind, database_path.display());
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
    pub use super::export::{to_csv_string, write_csv};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage_rejects_unknown_backend() {
        let err = create_storage("qdrant", Path::new("unused.db")).await.err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage("memory", Path::new("unused.db")).await.unwrap();
        assert_eq!(storage.row_count().await.unwrap(), 0);
    }
}
