//! WASM entry points for the wizard's web worker.
//!
//! Only compiled for `wasm32`. JavaScript calls `init` once, then passes
//! every wizard message through `process_message`.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::dispatch::process_json;
use crate::session::WizardSession;

// Single-threaded in the web worker.
thread_local! {
    static SESSION: RefCell<Option<WizardSession>> = const { RefCell::new(None) };
}

/// Start a session with the built-in shapes and no addons.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    SESSION.with(|cell| *cell.borrow_mut() = Some(WizardSession::new()));
}

/// Start a session from a JSON `SessionConfig`. Returns an error string on failure, empty on success.
#[wasm_bindgen]
pub fn init_with_config(config_json: &str) -> String {
    console_error_panic_hook::set_once();
    match WizardSession::from_json(config_json) {
        Ok(session) => {
            SESSION.with(|cell| *cell.borrow_mut() = Some(session));
            String::new()
        }
        Err(e) => e.to_string(),
    }
}

/// Process a JSON `WizardToCore` message and return a JSON `CoreToWizard` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    SESSION.with(|cell| {
        let mut session = cell.borrow_mut();
        match session.as_mut() {
            Some(session) => process_json(session, json_input),
            None => r#"{"type":"Error","message":"Session not initialized. Call init() first."}"#
                .to_string(),
        }
    })
}
