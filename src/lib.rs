//! Bridge domain path report for ACI leaf switches
//!
//! Logs in to a leaf's REST API, reads `fvBDDef`, `fvEpP` and `fvIfConn`,
//! and correlates them by DN into one row per bridge domain:
//! - multi-destination flood action
//! - number of EPGs deployed in the BD
//! - total static + dynamic paths (interface/VLAN pairs) across those EPGs

pub mod apic;
pub mod app;
pub mod cli;
mod command_handlers;
pub mod config;
pub mod correlate;
pub mod dn;
pub mod error;
pub mod exports;
pub mod extract;
pub mod logging;
pub mod models;
pub mod prompt;

pub use apic::{ApicFuture, ApicTransport, HttpTransport};
pub use app::{
    AppCommandResult, AppContext, OutputHook, ReportOutput, execute_command_typed,
    execute_command_with_context, run, run_with_context,
};
pub use cli::{CliCommand, ReportOptions};
pub use config::ApicSettings;
pub use correlate::{SegmentTableBuilder, correlate};
pub use error::{ApicError, exit_code_for};
pub use exports::OutputFormat;
pub use extract::{find_all, find_first};
pub use models::*;
