//! Application state module

use std::fmt;
use std::sync::Arc;

use clap::ValueEnum;

use crate::domain::mail::{mailer::Mailer, template::TemplateStore};

/// Deployment environment.
///
/// Development additionally serves the interactive API documentation;
/// production serves only the two service endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Local development
    Development,

    /// Deployed service
    #[default]
    Production,
}

/// Application configuration, immutable after startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// The deployment environment
    pub environment: Environment,

    /// The query parameter, header and cookie name carrying the API key
    pub api_key_name: String,

    /// The pre-shared API key
    pub api_key: String,
}

/// Global application state
pub struct AppState<M: Mailer, T: TemplateStore> {
    /// The application configuration
    pub config: AppConfig,

    /// The mail transport adapter
    pub mailer: Arc<M>,

    /// The template store
    pub templates: Arc<T>,
}

impl<M, T> AppState<M, T>
where
    M: Mailer,
    T: TemplateStore,
{
    /// Create a new application state
    pub fn new(config: AppConfig, mailer: M, templates: T) -> Self {
        Self {
            config,
            mailer: Arc::new(mailer),
            templates: Arc::new(templates),
        }
    }
}

// Manual impl: the adapters sit behind `Arc`s, so no `Clone` bound on them.
impl<M, T> Clone for AppState<M, T>
where
    M: Mailer,
    T: TemplateStore,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            mailer: Arc::clone(&self.mailer),
            templates: Arc::clone(&self.templates),
        }
    }
}

impl<M, T> fmt::Debug for AppState<M, T>
where
    M: Mailer,
    T: TemplateStore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("mailer", &"Mailer")
            .field("templates", &"TemplateStore")
            .finish()
    }
}
