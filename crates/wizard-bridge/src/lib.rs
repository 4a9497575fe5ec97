//! Message boundary between the wizard UI shell and the configurator core.
//!
//! The shell sends [`WizardToCore`] messages (JSON, `type`-tagged) and gets
//! one [`CoreToWizard`] response per message. On `wasm32` the same protocol
//! is exposed through `wasm_api::process_message`.

pub mod dispatch;
pub mod messages;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::{dispatch, process_json};
pub use messages::{CoreToWizard, WizardToCore};
pub use session::{BridgeError, SessionConfig, WizardSession};
