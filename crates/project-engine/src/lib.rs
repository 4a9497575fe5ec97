pub mod addons;
pub mod assembly;
pub mod catalog;
pub mod command;
pub mod factory;
pub mod merge;
pub mod reducer;
pub mod state;
pub mod validate;

use tracing::{debug, info, warn};

pub use assembly::{validate_assemblies, AssemblyReport};
pub use catalog::{CatalogError, ShapeCatalog, ShapeVariation};
pub use command::ProjectCommand;
pub use factory::{create_pieces, CreationError};
pub use merge::{AddonPatch, Patch, PiecePatch};
pub use reducer::{reduce, CommandError};
pub use state::{CalculationStatus, ProjectState, RequestToken};
pub use validate::{check_ready_for_pricing, validate_pieces, PieceIssue, PricingBlocked};

/// Owns the project state of one wizard session.
///
/// Commands are applied one at a time through [`reduce`]; a successful
/// command replaces the state wholesale, a failed one leaves it untouched.
#[derive(Debug, Clone)]
pub struct Project {
    /// Current state. Read freely; mutate only through [`Project::dispatch`].
    pub state: ProjectState,
    /// Shapes available to `CreatePiecesForShape`.
    pub shapes: ShapeCatalog,
}

impl Project {
    /// Create an empty project over the given shape catalog.
    pub fn new(shapes: ShapeCatalog) -> Self {
        Self {
            state: ProjectState::new(),
            shapes,
        }
    }

    /// Apply a command.
    pub fn dispatch(&mut self, command: ProjectCommand) -> Result<(), CommandError> {
        let name = command.name();
        match reduce(&self.state, command, &self.shapes) {
            Ok(next) => {
                self.state = next;
                debug!(command = name, pieces = self.state.pieces.len(), "Applied command");
                Ok(())
            }
            Err(e) if e.is_rejection() => {
                warn!(command = name, error = %e, "Command rejected");
                Err(e)
            }
            Err(e) => {
                debug!(command = name, reason = %e, "Command ignored");
                Err(e)
            }
        }
    }

    /// Start a price calculation and return its token.
    pub fn begin_calculation(&mut self) -> RequestToken {
        let (next, token) = reducer::start_calculation(&self.state);
        self.state = next;
        info!(token = token.0, "Price calculation started");
        token
    }

    /// Throw away all progress, keeping the catalog.
    pub fn reset(&mut self) {
        self.state = ProjectState::new();
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new(ShapeCatalog::builtin())
    }
}
