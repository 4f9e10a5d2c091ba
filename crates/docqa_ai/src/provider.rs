use std::time::Duration;

use docqa_core::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// HTTP client for an OpenAI-compatible API.
///
/// Holds the base URL, the bearer credential, and a request timeout. The
/// credential is optional at construction so offline runs can build the
/// client; it is checked on the first request instead.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        }
    }

    /// Build a client from `OPENAI_BASE_URL` and `OPENAI_API_KEY`.
    ///
    /// This is the only place in the crate that reads provider environment
    /// variables; everything below takes the constructed client.
    pub fn from_env(timeout: Duration) -> Self {
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self::new(&base_url, api_key, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `{base_url}{path}` and decode the JSON reply.
    ///
    /// Non-200 statuses come back as `ProviderError::Status` with whatever
    /// body text the server sent, so callers can log it verbatim.
    pub fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ProviderError> {
        let key = match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => k,
            _ => {
                return Err(ProviderError::MissingCredential {
                    provider: "openai".to_string(),
                })
            }
        };

        let url = format!("{}{path}", self.base_url);
        let resp = ureq::post(&url)
            .timeout(self.timeout)
            .set("Authorization", &format!("Bearer {key}"))
            .send_json(body);

        match resp {
            Ok(r) if r.status() == 200 => r
                .into_json()
                .map_err(|e| ProviderError::MalformedResponse(format!("invalid json body: {e}"))),
            Ok(r) => {
                let status = r.status();
                Err(ProviderError::Status {
                    status,
                    body: r.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Status(status, r)) => Err(ProviderError::Status {
                status,
                body: r.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(ProviderError::Transport(e.to_string())),
        }
    }
}
