//! Test harness for countertop configurator scenarios.
//!
//! Provides programmatic tools for scripting wizard sessions end to end,
//! verifying the layout and project at every step, and generating
//! diagnostic output.
//!
//! # Key Components
//!
//! - [`ScenarioBuilder`]: Fluent API driving the real bridge dispatch path
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Structured text scenario descriptions
//! - [`helpers`]: Error type, catalog fixtures, logging setup
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::ScenarioReport;
pub use workflow::ScenarioBuilder;
