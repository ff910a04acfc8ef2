//! Filesystem policy source - reads one artifact per version from a directory.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

use super::document::PolicyDocument;
use crate::domain::policy::{Policy, DEFAULT_CURRENCY};
use crate::ports::{PolicyLoadError, PolicySource};

/// Artifact formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Filesystem-based policy source
///
/// Every `*.json`, `*.yaml` or `*.yml` file directly inside the directory is
/// one policy version. Other files are ignored.
pub struct FsPolicySource {
    directory: PathBuf,
    default_currency: String,
}

impl FsPolicySource {
    /// Create a source reading from `directory`
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency applied to artifacts that omit one.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Lists artifact paths in name order so loads are reproducible.
    async fn artifact_paths(&self) -> Result<Vec<PathBuf>, PolicyLoadError> {
        let mut entries = fs::read_dir(&self.directory).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PolicyLoadError::SourceNotFound(self.describe())
            } else {
                PolicyLoadError::Io {
                    artifact: self.describe(),
                    reason: e.to_string(),
                }
            }
        })?;

        let mut paths = Vec::new();
        loop {
            let entry = entries.next_entry().await.map_err(|e| PolicyLoadError::Io {
                artifact: self.describe(),
                reason: e.to_string(),
            })?;
            let Some(entry) = entry else { break };

            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            let path = entry.path();
            if is_file && ArtifactFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }

        paths.sort();
        Ok(paths)
    }

    async fn read_artifact(&self, path: &Path) -> Result<Policy, PolicyLoadError> {
        let artifact = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = fs::read_to_string(path).await.map_err(|e| PolicyLoadError::Io {
            artifact: artifact.clone(),
            reason: e.to_string(),
        })?;

        let document: PolicyDocument = match ArtifactFormat::from_path(path) {
            Some(ArtifactFormat::Json) => serde_json::from_str(&content).map_err(|e| e.to_string()),
            Some(ArtifactFormat::Yaml) => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            None => Err("unsupported artifact extension".to_string()),
        }
        .map_err(|reason| PolicyLoadError::Parse {
            artifact: artifact.clone(),
            reason,
        })?;

        document
            .into_policy(&self.default_currency, Some(compute_checksum(&content)))
            .map_err(|e| PolicyLoadError::Invalid {
                artifact,
                reason: e.to_string(),
            })
    }
}

/// SHA-256 of the artifact text, hex encoded.
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl PolicySource for FsPolicySource {
    async fn load_all(&self) -> Result<Vec<Policy>, PolicyLoadError> {
        let paths = self.artifact_paths().await?;

        let mut policies = Vec::with_capacity(paths.len());
        for path in &paths {
            let policy = self.read_artifact(path).await?;
            tracing::debug!(
                version = policy.version(),
                artifact = %path.display(),
                "Read policy artifact"
            );
            policies.push(policy);
        }

        Ok(policies)
    }

    fn describe(&self) -> String {
        self.directory.display().to_string()
    }
}
