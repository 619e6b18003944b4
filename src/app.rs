use anyhow::{Context, Result};
use std::sync::Arc;

use crate::apic::ApicTransport;
use crate::cli::{CliCommand, parse_cli_args, usage_text, version_text};
use crate::command_handlers::run_report;
use crate::config::ApicSettings;
use crate::exports::{OutputFormat, export_report_json, export_rows_csv, render_table, report_rows};
use crate::models::SegmentReport;

pub type OutputHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct AppContext {
    settings: ApicSettings,
    transport: Option<Arc<dyn ApicTransport>>,
    output_hook: OutputHook,
}

/// Outcome of a `report` run, ready to be rendered
#[derive(Debug)]
pub struct ReportOutput {
    pub host: String,
    pub format: OutputFormat,
    pub dn_prefix: String,
    pub report: SegmentReport,
}

#[derive(Debug)]
pub enum AppCommandResult {
    HelpText(String),
    VersionText(String),
    Report(ReportOutput),
}

impl Default for AppContext {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AppContext {
    pub fn from_env() -> Self {
        Self {
            settings: ApicSettings::from_env(),
            transport: None,
            output_hook: Arc::new(|line| println!("{}", line)),
        }
    }

    pub fn with_settings(mut self, settings: ApicSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Use this transport instead of building an HTTPS client per run.
    pub fn with_transport(mut self, transport: Arc<dyn ApicTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_output_hook(mut self, output_hook: OutputHook) -> Self {
        self.output_hook = output_hook;
        self
    }

    pub fn settings(&self) -> &ApicSettings {
        &self.settings
    }

    pub fn transport(&self) -> Option<&Arc<dyn ApicTransport>> {
        self.transport.as_ref()
    }

    pub fn emit_line(&self, line: &str) {
        (self.output_hook)(line);
    }
}

/// Run the app by parsing CLI-style args and dispatching the command.
pub async fn run<I, S>(args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let context = AppContext::from_env();
    run_with_context(args, &context).await
}

/// Run the app with an explicit context (settings, transport and output hook).
pub async fn run_with_context<I, S>(args: I, context: &AppContext) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let command = parse_cli_args(args)?;
    execute_command_with_context(command, context).await
}

/// Execute a pre-parsed command with an explicit execution context.
pub async fn execute_command_with_context(command: CliCommand, context: &AppContext) -> Result<()> {
    let result = execute_command_typed(command, context).await?;
    emit_command_result(&result, context)
}

/// Execute a pre-parsed command and return a strongly-typed result payload.
pub async fn execute_command_typed(
    command: CliCommand,
    context: &AppContext,
) -> Result<AppCommandResult> {
    match command {
        CliCommand::Help => Ok(AppCommandResult::HelpText(usage_text())),
        CliCommand::Version => Ok(AppCommandResult::VersionText(version_text())),
        CliCommand::Report(options) => Ok(AppCommandResult::Report(
            run_report(options, context).await?,
        )),
    }
}

fn emit_command_result(result: &AppCommandResult, context: &AppContext) -> Result<()> {
    match result {
        AppCommandResult::HelpText(text) | AppCommandResult::VersionText(text) => {
            context.emit_line(text);
            Ok(())
        }
        AppCommandResult::Report(output) => {
            let rendered = match output.format {
                OutputFormat::Table => render_table(&report_rows(&output.report, &output.dn_prefix)),
                OutputFormat::Json => {
                    export_report_json(&output.report, &output.host, &output.dn_prefix)
                        .context("Failed to serialize report JSON")?
                }
                OutputFormat::Csv => export_rows_csv(&report_rows(&output.report, &output.dn_prefix))
                    .context("Failed to serialize report CSV")?,
            };
            context.emit_line(rendered.trim_end());
            Ok(())
        }
    }
}
