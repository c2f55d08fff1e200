//! Filesystem template store

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::mail::{
    errors::TemplateError,
    template::{Template, TemplateStore},
};

/// Template store reading files under a fixed root directory.
#[derive(Clone, Debug)]
pub struct FileTemplateStore {
    root: PathBuf,
}

impl FileTemplateStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Rejects identifiers that could escape the templates root.
    fn is_safe(name: &str) -> bool {
        Path::new(name)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn load(&self, name: &str) -> Result<Template, TemplateError> {
        if !Self::is_safe(name) {
            debug!(template = name, "rejected unsafe template identifier");
            return Err(TemplateError::NotFound);
        }

        match fs::read_to_string(self.root.join(name)).await {
            Ok(body) => Ok(Template::new(name, &body)),
            Err(err) => {
                // Missing and unreadable files are indistinguishable to
                // callers; the io cause only shows up in the logs.
                debug!(template = name, error = %err, "can not open message template");
                Err(TemplateError::NotFound)
            }
        }
    }
}
