use anyhow::Result;

use crate::config::{MAX_TIMEOUT_MS, MIN_TIMEOUT_MS, REQUEST_TIMEOUT};
use crate::exports::OutputFormat;

/// Command-line overrides for a report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub host: Option<String>,
    pub user: Option<String>,
    pub insecure: bool,
    pub format: OutputFormat,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Report(ReportOptions),
    Help,
    Version,
}

pub fn version_text() -> String {
    format!("epg-paths {}", env!("CARGO_PKG_VERSION"))
}

pub fn usage_text() -> String {
    format!(
        "{version}
Bridge domain / EPG / static+dynamic path summary for an ACI leaf

Usage:
  epg-paths [report] [--host <ADDR>] [--user <NAME>] [--insecure] [--format <FMT>] [--timeout-ms <N>]
  epg-paths --help
  epg-paths --version

Options:
  -H, --host <ADDR>       Leaf OOB address (prompted when omitted; env EPG_PATHS_HOST)
  -u, --user <NAME>       Username (prompted when omitted; env EPG_PATHS_USER)
  -k, --insecure          Skip TLS certificate validation (self-signed leaf certificates)
  -f, --format <FMT>      table | json | csv (default: table)
      --timeout-ms <N>    Per-request timeout, {min}..{max} (default: {default})
  -h, --help              Show this help text
  -V, --version           Show version

The password is always read from the terminal without echo (or EPG_PATHS_PASSWORD).

Exit codes: 0 success, 1 usage error, 2 authentication failure, 3 transport/fetch failure",
        version = version_text(),
        min = MIN_TIMEOUT_MS,
        max = MAX_TIMEOUT_MS,
        default = REQUEST_TIMEOUT.as_millis()
    )
}

fn parse_timeout_arg(raw: &str) -> Result<u64> {
    raw.parse::<u64>().ok().filter(|v| *v > 0).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid value for --timeout-ms: '{}'. Expected a positive integer.\n\n{}",
            raw,
            usage_text()
        )
    })
}

fn parse_format_arg(raw: &str) -> Result<OutputFormat> {
    OutputFormat::parse(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid value for --format: '{}'. Expected table, json or csv.\n\n{}",
            raw,
            usage_text()
        )
    })
}

fn non_empty<'a>(flag: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(anyhow::anyhow!(
            "Missing value for {}.\n\n{}",
            flag,
            usage_text()
        ));
    }
    Ok(value)
}

pub fn parse_cli_args<I, S>(args: I) -> Result<CliCommand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = args.into_iter();
    let _program_name = iter.next();

    let mut options = ReportOptions::default();

    while let Some(arg) = iter.next() {
        let arg = arg.as_ref();

        // `--flag=value` form
        if let Some((flag, value)) = arg.split_once('=').filter(|(f, _)| f.starts_with("--")) {
            let value = non_empty(flag, value)?;
            match flag {
                "--host" => options.host = Some(value.to_string()),
                "--user" => options.user = Some(value.to_string()),
                "--format" => options.format = parse_format_arg(value)?,
                "--timeout-ms" => options.timeout_ms = Some(parse_timeout_arg(value)?),
                _ => {
                    return Err(anyhow::anyhow!(
                        "Unknown argument: {arg}\n\n{}",
                        usage_text()
                    ));
                }
            }
            continue;
        }

        match arg {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "report" => {}
            "-k" | "--insecure" => options.insecure = true,
            "-H" | "--host" | "-u" | "--user" | "-f" | "--format" | "--timeout-ms" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow::anyhow!("Missing value for {}.\n\n{}", arg, usage_text())
                })?;
                let value = non_empty(arg, value.as_ref())?;
                match arg {
                    "-H" | "--host" => options.host = Some(value.to_string()),
                    "-u" | "--user" => options.user = Some(value.to_string()),
                    "-f" | "--format" => options.format = parse_format_arg(value)?,
                    _ => options.timeout_ms = Some(parse_timeout_arg(value)?),
                }
            }
            _ => {
                return Err(anyhow::anyhow!(
                    "Unknown argument: {arg}\n\n{}",
                    usage_text()
                ));
            }
        }
    }

    Ok(CliCommand::Report(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_help_flag() {
        let parsed = parse_cli_args(["epg-paths", "--help"]).expect("help args should parse");
        assert_eq!(parsed, CliCommand::Help);
    }

    #[test]
    fn parse_version_flag() {
        let parsed = parse_cli_args(["epg-paths", "-V"]).expect("version args should parse");
        assert_eq!(parsed, CliCommand::Version);
    }

    #[test]
    fn parse_default_report_command() {
        let parsed = parse_cli_args(["epg-paths"]).expect("default args should parse");
        assert_eq!(parsed, CliCommand::Report(ReportOptions::default()));
    }

    #[test]
    fn parse_report_with_all_options() {
        let args = [
            "epg-paths",
            "report",
            "--host",
            "10.1.1.101",
            "-u",
            "admin",
            "--insecure",
            "--format=json",
            "--timeout-ms",
            "2500",
        ];
        let parsed = parse_cli_args(args).expect("report options should parse");
        assert_eq!(
            parsed,
            CliCommand::Report(ReportOptions {
                host: Some("10.1.1.101".to_string()),
                user: Some("admin".to_string()),
                insecure: true,
                format: OutputFormat::Json,
                timeout_ms: Some(2500),
            })
        );
    }

    #[test]
    fn parse_rejects_bad_format() {
        let err = parse_cli_args(["epg-paths", "--format", "xml"]).expect_err("xml is not a format");
        assert!(err.to_string().contains("Invalid value for --format"));
    }

    #[test]
    fn parse_rejects_missing_value() {
        let err = parse_cli_args(["epg-paths", "--host"]).expect_err("host needs a value");
        assert!(err.to_string().contains("Missing value for --host"));

        let err = parse_cli_args(["epg-paths", "--user="]).expect_err("empty user");
        assert!(err.to_string().contains("Missing value for --user"));
    }

    #[test]
    fn parse_rejects_zero_timeout() {
        let err = parse_cli_args(["epg-paths", "--timeout-ms=0"]).expect_err("zero timeout");
        assert!(err.to_string().contains("Expected a positive integer"));
    }

    #[test]
    fn parse_unknown_argument_errors() {
        let err = parse_cli_args(["epg-paths", "--unknown"]).expect_err("unknown flag should fail");
        assert!(err.to_string().contains("Unknown argument"));

        let err = parse_cli_args(["epg-paths", "--colour=red"]).expect_err("unknown flag should fail");
        assert!(err.to_string().contains("Unknown argument"));
    }
}
