use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::apic::classes::{BD_DEF, EP_P, IF_CONN};
use crate::apic::{ApicTransport, HttpTransport};
use crate::app::{AppContext, ReportOutput};
use crate::cli::ReportOptions;
use crate::config::{ApicSettings, clamp_timeout_ms};
use crate::correlate::SegmentTableBuilder;
use crate::models::Session;
use crate::prompt::resolve_credentials;

/// Authenticate, read the three classes in turn and correlate them.
pub(crate) async fn run_report(options: ReportOptions, context: &AppContext) -> Result<ReportOutput> {
    let started = Instant::now();
    let settings = merge_settings(context.settings(), &options);
    let credentials = resolve_credentials(&settings)?;

    let transport: Arc<dyn ApicTransport> = match context.transport() {
        Some(transport) => Arc::clone(transport),
        None => Arc::new(HttpTransport::new(&credentials.host, &settings)?),
    };

    crate::log_stderr!("Logging in to {} as {}", credentials.host, credentials.username);
    let session = transport
        .login(&credentials)
        .await
        .with_context(|| format!("Login to {} failed", credentials.host))?;

    let mut builder = SegmentTableBuilder::new();

    let bd_defs = fetch(transport.as_ref(), &session, BD_DEF).await?;
    builder.register_segments(&bd_defs);

    let epg_links = fetch(transport.as_ref(), &session, EP_P).await?;
    builder.attach_endpoint_groups(&epg_links);

    let if_conns = fetch(transport.as_ref(), &session, IF_CONN).await?;
    builder.tally_paths(&if_conns);

    let report = builder.finish();

    crate::log_stderr!(
        "Correlated {} bridge domains, {} EPG links, {} paths in {:.2}s ({} records skipped)",
        report.segments.len(),
        report.fetched.endpoint_group_links,
        report.fetched.interface_connections,
        started.elapsed().as_secs_f64(),
        report.inconsistencies.len()
    );

    Ok(ReportOutput {
        host: credentials.host,
        format: options.format,
        dn_prefix: settings.dn_prefix,
        report,
    })
}

async fn fetch(
    transport: &dyn ApicTransport,
    session: &Session,
    class: &str,
) -> Result<Vec<serde_json::Value>> {
    let records = transport
        .fetch_class(session, class)
        .await
        .with_context(|| format!("Failed to read class {}", class))?;
    crate::log_debug!("{}: {} records", class, records.len());
    Ok(records)
}

fn merge_settings(base: &ApicSettings, options: &ReportOptions) -> ApicSettings {
    let mut settings = base.clone();
    if let Some(host) = &options.host {
        settings.host = Some(host.clone());
    }
    if let Some(user) = &options.user {
        settings.username = Some(user.clone());
    }
    if options.insecure {
        settings.insecure = true;
    }
    if let Some(ms) = options.timeout_ms {
        settings.timeout_ms = clamp_timeout_ms(ms);
    }
    settings
}
