//! Leaf/APIC REST API access
//!
//! A run needs exactly two kinds of request: one `aaaLogin` and one class
//! read per managed-object class. Both go through [`ApicTransport`] so the
//! pipeline can run against canned data.

pub mod classes;
pub mod http;

use serde_json::{Value, json};
use std::future::Future;
use std::pin::Pin;

use crate::config::{CLASS_PATH, LOGIN_PATH, RESPONSE_ENVELOPE_KEY};
use crate::error::ApicError;
use crate::extract::require_str;
use crate::models::{Credentials, Session};

pub use http::HttpTransport;

pub type ApicFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApicError>> + Send + 'a>>;

pub trait ApicTransport: Send + Sync {
    /// Exchange credentials for a session token.
    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApicFuture<'a, Session>;

    /// Read every object of `class`, ordered by DN descending on the device.
    fn fetch_class<'a>(
        &'a self,
        session: &'a Session,
        class: &'a str,
    ) -> ApicFuture<'a, Vec<Value>>;
}

/// `https://<host>` unless the host already carries a scheme.
pub fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

pub fn login_url(host: &str) -> String {
    format!("{}{}", base_url(host), LOGIN_PATH)
}

pub fn class_url(host: &str, class: &str) -> String {
    format!(
        "{}{}/{}.json?&order-by={}.dn|desc",
        base_url(host),
        CLASS_PATH,
        class,
        class
    )
}

pub fn login_body(credentials: &Credentials) -> Value {
    json!({
        "aaaUser": {
            "attributes": {
                "name": credentials.username,
                "pwd": credentials.password,
            }
        }
    })
}

/// Pull the session token out of a successful `aaaLogin` reply.
pub fn session_from_login_reply(reply: &Value) -> Result<Session, ApicError> {
    let token = require_str(reply, classes::ATTR_TOKEN, "aaaLogin reply").map_err(|_| {
        ApicError::AuthenticationFailure {
            status: Some(200),
            detail: "login reply carried no session token".to_string(),
        }
    })?;
    Ok(Session {
        token: token.to_string(),
    })
}

/// Object list under the response envelope; empty when the envelope is absent.
pub fn envelope_records(reply: Value) -> Vec<Value> {
    match reply {
        Value::Object(mut map) => match map.remove(RESPONSE_ENVELOPE_KEY) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
