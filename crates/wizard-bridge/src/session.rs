use encimera_types::{AddonInfo, CatalogLoadError, InMemoryAddonCatalog};
use layout_engine::{compute_layout, Layout, LayoutConfig};
use pricing_snapshot::SnapshotError;
use project_engine::{
    validate_assemblies, AssemblyReport, CatalogError, CommandError, Project, ProjectCommand,
    ShapeCatalog, ShapeVariation,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Startup configuration handed over by the shell. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub layout: LayoutConfig,
    /// Replaces the built-in shapes when present.
    pub shapes: Option<Vec<ShapeVariation>>,
    pub addons: Vec<AddonInfo>,
}

/// Errors surfaced across the bridge.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid session config: {0}")]
    Config(String),

    #[error(transparent)]
    Shapes(#[from] CatalogError),

    #[error("invalid addon catalog: {0}")]
    Addons(#[from] CatalogLoadError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Everything one wizard run needs: the project plus the catalogs it is checked against.
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub project: Project,
    pub addons: InMemoryAddonCatalog,
    pub layout_config: LayoutConfig,
    /// Stamped on every pricing request.
    pub session_id: Uuid,
}

impl WizardSession {
    /// A session over the built-in shapes with an empty addon catalog.
    pub fn new() -> Self {
        Self {
            project: Project::default(),
            addons: InMemoryAddonCatalog::default(),
            layout_config: LayoutConfig::default(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn from_config(config: SessionConfig) -> Result<Self, BridgeError> {
        let shapes = match config.shapes {
            Some(variations) => ShapeCatalog::new(variations)?,
            None => ShapeCatalog::builtin(),
        };
        let session = Self {
            project: Project::new(shapes),
            addons: InMemoryAddonCatalog::new(config.addons)?,
            layout_config: config.layout,
            session_id: Uuid::new_v4(),
        };
        info!(
            session = %session.session_id,
            shapes = session.project.shapes.len(),
            addons = session.addons.len(),
            "Wizard session created"
        );
        Ok(session)
    }

    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let config: SessionConfig =
            serde_json::from_str(json).map_err(|e| BridgeError::Config(e.to_string()))?;
        Self::from_config(config)
    }

    /// Apply a reducer command to the project.
    pub fn apply(&mut self, command: ProjectCommand) -> Result<(), BridgeError> {
        self.project.dispatch(command)?;
        Ok(())
    }

    /// Swap the addon catalog. The old one stays if the new one is invalid.
    pub fn load_addons(&mut self, addons: Vec<AddonInfo>) -> Result<(), BridgeError> {
        self.addons = InMemoryAddonCatalog::new(addons)?;
        info!(addons = self.addons.len(), "Addon catalog loaded");
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        compute_layout(&self.project.state.pieces, &self.layout_config)
    }

    pub fn assembly(&self) -> AssemblyReport {
        validate_assemblies(&self.project.state.pieces, &self.addons)
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}
