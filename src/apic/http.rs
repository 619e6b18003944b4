use reqwest::Client;
use reqwest::header::COOKIE;
use serde_json::Value;

use crate::apic::{
    ApicFuture, ApicTransport, class_url, envelope_records, login_body, login_url,
    session_from_login_reply,
};
use crate::config::ApicSettings;
use crate::error::ApicError;
use crate::models::{Credentials, Session};

/// REST transport over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    host: String,
}

impl HttpTransport {
    pub fn new(host: &str, settings: &ApicSettings) -> Result<Self, ApicError> {
        if settings.insecure {
            crate::log_warn!(
                "TLS certificate validation is DISABLED for {} (--insecure)",
                host
            );
        }

        let client = Client::builder()
            .timeout(settings.timeout())
            .danger_accept_invalid_certs(settings.insecure)
            .build()
            .map_err(|e| ApicError::Transport {
                url: host.to_string(),
                reason: format!("HTTP client init failed: {}", e),
            })?;

        Ok(Self {
            client,
            host: host.to_string(),
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ApicError {
    let mut reason = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    // reqwest's Display stops at "error sending request"; the cause sits below it.
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    ApicError::Transport {
        url: url.to_string(),
        reason,
    }
}

impl ApicTransport for HttpTransport {
    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApicFuture<'a, Session> {
        Box::pin(async move {
            let url = login_url(&self.host);
            crate::log_debug!("POST {}", url);

            let response = self
                .client
                .post(&url)
                .json(&login_body(credentials))
                .send()
                .await
                .map_err(|e| ApicError::AuthenticationFailure {
                    status: None,
                    detail: transport_error(&url, e).to_string(),
                })?;

            let status = response.status();
            if status.as_u16() != 200 {
                return Err(ApicError::auth_status(status.as_u16()));
            }

            let reply: Value = response
                .json()
                .await
                .map_err(|e| ApicError::AuthenticationFailure {
                    status: Some(status.as_u16()),
                    detail: format!("login reply is not valid JSON: {}", e),
                })?;

            session_from_login_reply(&reply)
        })
    }

    fn fetch_class<'a>(
        &'a self,
        session: &'a Session,
        class: &'a str,
    ) -> ApicFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let url = class_url(&self.host, class);
            crate::log_debug!("GET {}", url);

            let response = self
                .client
                .get(&url)
                .header(COOKIE, session.cookie_header())
                .send()
                .await
                .map_err(|e| transport_error(&url, e))?;

            let status = response.status();
            if status.as_u16() != 200 {
                return Err(ApicError::FetchFailed {
                    class: class.to_string(),
                    status: status.as_u16(),
                });
            }

            let reply: Value = response.json().await.map_err(|e| ApicError::Transport {
                url: url.clone(),
                reason: format!("reply is not valid JSON: {}", e),
            })?;

            Ok(envelope_records(reply))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers one request with `status` and `body`; the handle yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let body_len = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + body_len
    }

    fn transport_for(host: &str) -> HttpTransport {
        HttpTransport::new(host, &ApicSettings::default()).unwrap()
    }

    fn creds(host: &str) -> Credentials {
        Credentials {
            host: host.to_string(),
            username: "admin".to_string(),
            password: "pw".to_string(),
        }
    }

    fn session() -> Session {
        Session {
            token: "T".to_string(),
        }
    }

    #[test]
    fn builds_client_with_and_without_certificate_checks() {
        let mut settings = ApicSettings::default();
        assert!(HttpTransport::new("10.0.0.1", &settings).is_ok());

        settings.insecure = true;
        assert!(HttpTransport::new("10.0.0.1", &settings).is_ok());
    }

    #[tokio::test]
    async fn login_posts_credentials_and_returns_token() {
        let (host, server) = serve_once(
            "200 OK",
            r#"{"imdata":[{"aaaLogin":{"attributes":{"token":"tok-1"}}}]}"#,
        )
        .await;

        let session = transport_for(&host).login(&creds(&host)).await.unwrap();
        assert_eq!(session.token, "tok-1");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/aaaLogin.json HTTP/1.1"));
        assert!(request.contains(r#""aaaUser""#));
        assert!(request.contains(r#""name":"admin""#));
    }

    #[tokio::test]
    async fn login_rejected_carries_status() {
        let (host, server) = serve_once("401 Unauthorized", "{}").await;

        let err = transport_for(&host).login(&creds(&host)).await.unwrap_err();
        assert!(matches!(
            err,
            ApicError::AuthenticationFailure {
                status: Some(401),
                ..
            }
        ));
        assert!(err.to_string().contains("401"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn class_read_sends_cookie_and_ordered_query() {
        let (host, server) = serve_once(
            "200 OK",
            r#"{"totalCount":"1","imdata":[{"fvBDDef":{"attributes":{"bdDn":"uni/tn-t1/BD-b1"}}}]}"#,
        )
        .await;

        let records = transport_for(&host)
            .fetch_class(&session(), "fvBDDef")
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["fvBDDef"]["attributes"]["bdDn"], "uni/tn-t1/BD-b1");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/node/class/fvBDDef.json?&order-by=fvBDDef.dn|desc HTTP/1.1")
        );
        assert!(request.to_ascii_lowercase().contains("cookie: apic-cookie=t\r\n"));
    }

    #[tokio::test]
    async fn class_read_non_200_is_fetch_failure() {
        let (host, server) = serve_once("500 Internal Server Error", "{}").await;

        let err = transport_for(&host)
            .fetch_class(&session(), "fvIfConn")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApicError::FetchFailed { ref class, status: 500 } if class == "fvIfConn"
        ));
        assert_eq!(err.exit_code(), crate::error::EXIT_FETCH_FAILURE);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_host_fails_login_with_underlying_cause() {
        let settings = ApicSettings {
            timeout_ms: 500,
            ..ApicSettings::default()
        };
        // Port 9 on loopback: nothing listens, connect is refused immediately.
        let transport = HttpTransport::new("http://127.0.0.1:9", &settings).unwrap();

        let err = transport.login(&creds("http://127.0.0.1:9")).await.unwrap_err();
        let ApicError::AuthenticationFailure { status, detail } = err else {
            panic!("connection refused should surface as an authentication failure");
        };
        assert_eq!(status, None);
        assert!(
            detail.to_ascii_lowercase().contains("refused"),
            "cause missing from: {}",
            detail
        );
    }
}
