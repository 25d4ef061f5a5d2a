use async_trait::async_trait;
use netoverride_application::ports::ResolverControl;
use netoverride_domain::{DomainError, ResolverPreferences};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolver preferences persisted as a small TOML file. A missing file reads
/// as the disabled defaults.
pub struct FileResolverControl {
    path: PathBuf,
}

impl FileResolverControl {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn control_error(&self, e: impl std::fmt::Display) -> DomainError {
        DomainError::ResolverControl(format!("{}: {}", self.path.display(), e))
    }
}

#[async_trait]
impl ResolverControl for FileResolverControl {
    async fn load(&self) -> Result<ResolverPreferences, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => toml::from_str(&contents).map_err(|e| self.control_error(e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No resolver preferences yet");
                Ok(ResolverPreferences::default())
            }
            Err(e) => Err(self.control_error(e)),
        }
    }

    async fn save(&self, prefs: &ResolverPreferences) -> Result<(), DomainError> {
        let body = toml::to_string_pretty(prefs).map_err(|e| self.control_error(e))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.control_error(e))?;
        }
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.control_error(e))
    }
}
