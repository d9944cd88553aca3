use thiserror::Error;

/// Why a forecast fetch failed.
///
/// Each variant's message is what the view shows to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("Network request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The backend answered with a non-success status.
    #[error("HTTP {}{} from {}", .status, reason_suffix(.status_text), .url)]
    HttpStatus {
        status: u16,
        status_text: String,
        url: String,
    },

    /// The backend (or a proxy in front of it) answered with an HTML page.
    #[error(
        "Expected JSON from {url} but received HTML; check the backend URL or proxy. Response starts with: {snippet}"
    )]
    ContentType { url: String, snippet: String },

    /// The body was not a JSON array of forecasts.
    #[error("Failed to parse forecast data from {url}: {reason}")]
    Parse { url: String, reason: String },
}

/// `" Not Found"`, or nothing for codes without a reason phrase.
fn reason_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" {status_text}")
    }
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::ContentType { url, .. }
            | FetchError::Parse { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_names_code_and_url() {
        let err = FetchError::HttpStatus {
            status: 404,
            status_text: "Not Found".into(),
            url: "http://localhost/api/weatherforecast".into(),
        };

        assert_eq!(
            err.to_string(),
            "HTTP 404 Not Found from http://localhost/api/weatherforecast"
        );
        assert_eq!(err.url(), "http://localhost/api/weatherforecast");
    }

    #[test]
    fn http_status_without_reason_phrase() {
        let err = FetchError::HttpStatus {
            status: 599,
            status_text: String::new(),
            url: "http://localhost/api/weatherforecast".into(),
        };

        assert_eq!(
            err.to_string(),
            "HTTP 599 from http://localhost/api/weatherforecast"
        );
    }

    #[test]
    fn content_type_message_carries_snippet() {
        let err = FetchError::ContentType {
            url: "http://x/weatherforecast".into(),
            snippet: "<!doctype html> <html>".into(),
        };

        let msg = err.to_string();
        assert!(msg.contains("http://x/weatherforecast"));
        assert!(msg.ends_with("<!doctype html> <html>"));
    }
}
