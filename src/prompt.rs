//! Interactive credential prompts

use std::io::{self, BufRead, Write};

use crate::config::ApicSettings;
use crate::error::ApicError;
use crate::models::Credentials;

/// Fill in whatever the settings left empty by asking on the terminal.
///
/// EOF or an empty answer aborts the run as an authentication failure.
pub fn resolve_credentials(settings: &ApicSettings) -> Result<Credentials, ApicError> {
    let host = match &settings.host {
        Some(host) => host.clone(),
        None => prompt_line("LEAF OOB address: ")?,
    };
    let username = match &settings.username {
        Some(user) => user.clone(),
        None => prompt_line("Username: ")?,
    };
    let password = match &settings.password {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| ApicError::auth_aborted(format!("password prompt failed: {}", e)))?,
    };

    if password.is_empty() {
        return Err(ApicError::auth_aborted("empty password"));
    }

    Ok(Credentials {
        host,
        username,
        password,
    })
}

fn prompt_line(label: &str) -> Result<String, ApicError> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", label)
        .and_then(|_| stderr.flush())
        .map_err(|e| ApicError::auth_aborted(format!("prompt failed: {}", e)))?;

    read_answer(&mut io::stdin().lock(), label)
}

fn read_answer<R: BufRead>(input: &mut R, label: &str) -> Result<String, ApicError> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ApicError::auth_aborted(format!("prompt failed: {}", e)))?;

    let answer = line.trim();
    if read == 0 || answer.is_empty() {
        return Err(ApicError::auth_aborted(format!(
            "no answer for `{}`",
            label.trim_end_matches([':', ' '])
        )));
    }
    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_is_trimmed() {
        let mut input = io::Cursor::new("  10.0.0.1 \n");
        assert_eq!(read_answer(&mut input, "LEAF OOB address: ").unwrap(), "10.0.0.1");
    }

    #[test]
    fn eof_aborts_as_auth_failure() {
        let mut input = io::Cursor::new("");
        let err = read_answer(&mut input, "Username: ").unwrap_err();
        assert!(matches!(err, ApicError::AuthenticationFailure { status: None, .. }));
        assert!(err.to_string().contains("Username"));
    }

    #[test]
    fn prefilled_settings_skip_prompts() {
        let settings = ApicSettings {
            host: Some("leaf101".to_string()),
            username: Some("admin".to_string()),
            password: Some("pw".to_string()),
            ..ApicSettings::default()
        };
        let creds = resolve_credentials(&settings).unwrap();
        assert_eq!(creds.host, "leaf101");
        assert_eq!(creds.username, "admin");
    }

    #[test]
    fn empty_prefilled_password_is_rejected() {
        let settings = ApicSettings {
            host: Some("leaf101".to_string()),
            username: Some("admin".to_string()),
            password: Some(String::new()),
            ..ApicSettings::default()
        };
        let err = resolve_credentials(&settings).unwrap_err();
        assert!(matches!(err, ApicError::AuthenticationFailure { status: None, .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_AUTH_FAILURE);
    }
}
