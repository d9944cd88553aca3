use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::{Config, Forecast, error::FetchError, model::normalize_response};

/// Path segment appended to the base URL.
pub const FORECAST_PATH: &str = "/weatherforecast";

const SNIPPET_MAX_CHARS: usize = 200;

/// Anything that can produce the current forecast list.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Fully resolved URL the source reads from.
    fn endpoint(&self) -> &str;

    async fn fetch_forecasts(&self) -> Result<Vec<Forecast>, FetchError>;
}

/// Reads forecasts from `GET <base>/weatherforecast`.
#[derive(Debug, Clone)]
pub struct HttpForecastSource {
    url: String,
    http: Client,
}

impl HttpForecastSource {
    pub fn new(base: &str) -> Self {
        Self::with_client(base, Client::new())
    }

    pub fn with_client(base: &str, http: Client) -> Self {
        Self {
            url: endpoint_url(base),
            http,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.resolved_base())
    }
}

#[async_trait]
impl ForecastSource for HttpForecastSource {
    fn endpoint(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_forecasts(&self) -> Result<Vec<Forecast>, FetchError> {
        debug!("requesting forecasts");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url: self.url.clone(),
            });
        }

        let is_html = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_html_content_type);

        let body = res.text().await.map_err(|e| self.transport(e))?;

        if is_html {
            return Err(FetchError::ContentType {
                url: self.url.clone(),
                snippet: body_snippet(&body),
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let forecasts = normalize_response(&value).ok_or_else(|| FetchError::Parse {
            url: self.url.clone(),
            reason: "expected a JSON array of forecasts".to_string(),
        })?;

        debug!(count = forecasts.len(), "forecasts received");
        Ok(forecasts)
    }
}

impl HttpForecastSource {
    fn transport(&self, err: reqwest::Error) -> FetchError {
        FetchError::Transport {
            url: self.url.clone(),
            reason: error_chain(&err),
        }
    }
}

/// `<base>/weatherforecast`, with trailing slashes on `base` stripped.
pub fn endpoint_url(base: &str) -> String {
    format!("{}{FORECAST_PATH}", base.trim_end_matches('/'))
}

fn is_html_content_type(value: &str) -> bool {
    value.to_ascii_lowercase().contains("text/html")
}

/// Whitespace-collapsed body prefix of at most 200 characters.
pub fn body_snippet(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((idx, _)) => collapsed[..idx].to_string(),
        None => collapsed,
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        assert_eq!(
            endpoint_url("http://localhost/api/"),
            "http://localhost/api/weatherforecast"
        );
        assert_eq!(endpoint_url("http://h:1"), "http://h:1/weatherforecast");
    }

    #[test]
    fn source_from_config_uses_resolved_base() {
        let source = HttpForecastSource::from_config(&Config::default());
        assert_eq!(source.endpoint(), "http://localhost/api/weatherforecast");
    }

    #[test]
    fn html_detection_ignores_case_and_params() {
        assert!(is_html_content_type("text/html; charset=utf-8"));
        assert!(is_html_content_type("Text/HTML"));
        assert!(!is_html_content_type("application/json"));
    }

    #[test]
    fn snippet_collapses_whitespace() {
        let body = "<html>\n   <head>\t<title>Oops</title>\n</head>";
        assert_eq!(body_snippet(body), "<html> <head> <title>Oops</title> </head>");
    }

    #[test]
    fn snippet_is_truncated_on_char_boundary() {
        let body = "é".repeat(500);
        let snippet = body_snippet(&body);
        assert_eq!(snippet.chars().count(), 200);

        let short = "<p>short</p>";
        assert_eq!(body_snippet(short), short);
    }
}
