//! LanguageTool grammar collaborator.
//!
//! Implements the core [`GrammarChecker`] seam against a LanguageTool
//! server's `POST /v2/check` endpoint. Every request carries a bounded
//! timeout; transport and protocol failures map onto [`GrammarError`], which
//! the grammar handler degrades to an N/A verdict for the affected clause.

use std::time::Duration;

use ampel_core::{GrammarChecker, GrammarError};
use serde::Deserialize;

/// Blocking HTTP client for a LanguageTool server.
///
/// The operator supplies the server URL; there is no default public
/// endpoint. The client holds no per-document state and may be reused across
/// documents.
pub struct LanguageToolClient {
    base_url: String,
    language: String,
    timeout: Duration,
    client: reqwest::blocking::Client,
}

/// Response body of `/v2/check`. Only the number of matches is consumed.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<GrammarMatch>,
}

#[derive(Debug, Deserialize)]
struct GrammarMatch {
    #[allow(dead_code)]
    #[serde(default)]
    message: String,
}

impl LanguageToolClient {
    /// Create a client for the server at `base_url` (e.g.
    /// `http://localhost:8010`), checking text as `language` (e.g. `en-US`
    /// or `de-DE`).
    pub fn new(
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GrammarError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GrammarError::Unavailable(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
            timeout,
            client,
        })
    }
}

impl GrammarChecker for LanguageToolClient {
    fn check(&self, text: &str) -> Result<usize, GrammarError> {
        let url = format!("{}/v2/check", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("language", self.language.as_str()), ("text", text)])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GrammarError::Timeout(self.timeout)
                } else {
                    GrammarError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GrammarError::Protocol(format!(
                "HTTP {status} from {url}"
            )));
        }

        let body: CheckResponse = response
            .json()
            .map_err(|e| GrammarError::Protocol(e.to_string()))?;

        Ok(body.matches.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_matches_in_a_check_response() {
        let body = r#"{
            "software": { "name": "LanguageTool" },
            "matches": [
                { "message": "Possible spelling mistake found.", "offset": 4 },
                { "message": "This sentence does not start with an uppercase letter.", "offset": 0 }
            ]
        }"#;
        let parsed: CheckResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.matches.len(), 2);
    }

    #[test]
    fn missing_matches_key_means_zero_issues() {
        let parsed: CheckResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.matches.is_empty());
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let client =
            LanguageToolClient::new("http://localhost:8010/", "de-DE", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url, "http://localhost:8010");
    }
}
