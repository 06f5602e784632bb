//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::ExportService;
use crate::config::Settings;
use crate::domain::ValidationMode;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Export service using the configured validation mode.
    pub fn export_service(&self) -> ExportService {
        self.export_service_with_mode(self.settings.validation.mode)
    }

    /// Export service with an explicit validation mode (e.g. from `--lenient`).
    pub fn export_service_with_mode(&self, mode: ValidationMode) -> ExportService {
        ExportService::new(Arc::clone(&self.fs), self.settings.export.clone(), mode)
    }
}
