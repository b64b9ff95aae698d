use crate::domain::errors::DomainError;
use crate::infrastructure::logging::logger;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tokio::fs::{self as tokio_fs, create_dir_all, read_to_string};

/// Represents the application data directory structure
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
    documents: PathBuf,
    storage: PathBuf,
}

impl DataDirectory {
    /// Create a new DataDirectory instance
    pub fn new(root: PathBuf) -> Self {
        let documents = root.join("documents");
        let storage = root.join("storage");

        Self {
            root,
            documents,
            storage,
        }
    }

    /// Initialize the data directory structure
    pub async fn initialize(&self) -> Result<(), DomainError> {
        tracing::info!("Initializing data directory at: {:?}", self.root);

        self.create_directory(&self.root).await?;
        self.create_directory(&self.documents).await?;
        self.create_directory(&self.storage).await?;

        tracing::info!("Data directory initialized successfully");
        Ok(())
    }

    /// Create a directory if it doesn't exist
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        if !path.exists() {
            tracing::info!("Creating directory: {:?}", path);
            create_dir_all(path).await.map_err(|e| {
                tracing::error!("Failed to create directory {:?}: {}", path, e);
                DomainError::InternalError(format!("Failed to create directory: {}", e))
            })?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One JSON file per collection lives here
    pub fn documents(&self) -> &Path {
        &self.documents
    }

    /// Uploaded objects, laid out by their storage path
    pub fn storage(&self) -> &Path {
        &self.storage
    }
}

/// Read a JSON file and deserialize it
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    logger::debug(&format!("Reading JSON file: {:?}", path));

    let contents = read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DomainError::NotFound(format!("File not found: {}", path.display()))
        } else {
            logger::error(&format!("Failed to read file {:?}: {}", path, e));
            DomainError::InternalError(format!("Failed to read file: {}", e))
        }
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        logger::error(&format!("Failed to parse JSON from file {:?}: {}", path, e));
        DomainError::InvalidData(format!("Invalid JSON: {}", e))
    })
}

/// Write a JSON file.
///
/// The data goes to a sibling temp file first and is renamed over the target,
/// so readers never observe a half-written file.
pub async fn write_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), DomainError> {
    logger::debug(&format!("Writing JSON file: {:?}", path));

    if let Some(parent) = path.parent() {
        create_dir_all(parent).await.map_err(|e| {
            logger::error(&format!(
                "Failed to create parent directory for {:?}: {}",
                path, e
            ));
            DomainError::InternalError(format!("Failed to create directory: {}", e))
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(|e| {
        logger::error(&format!(
            "Failed to serialize to JSON for file {:?}: {}",
            path, e
        ));
        DomainError::InvalidData(format!("Failed to serialize to JSON: {}", e))
    })?;

    let temp_path = path.with_extension("json.tmp");
    tokio_fs::write(&temp_path, json).await.map_err(|e| {
        logger::error(&format!("Failed to write to file {:?}: {}", temp_path, e));
        DomainError::InternalError(format!("Failed to write to file: {}", e))
    })?;

    tokio_fs::rename(&temp_path, path).await.map_err(|e| {
        logger::error(&format!("Failed to replace file {:?}: {}", path, e));
        DomainError::InternalError(format!("Failed to write to file: {}", e))
    })?;

    Ok(())
}
