use serde::{Deserialize, Serialize};

/// How a 2xx response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// `{success, data, error}` envelope; `data` is the result.
    Envelope,
    /// The whole body is the result.
    Bare,
}

/// Where failures are shown besides the status element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDisplay {
    /// Error text is written into the output field.
    Inline,
    /// Output field is cleared.
    StatusOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub response_mode: ResponseMode,
    pub error_display: ErrorDisplay,
    pub show_busy_placeholder: bool,
    pub status_dismiss_ms: u64,
    pub submit_label: String,
    pub busy_label: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            response_mode: ResponseMode::Envelope,
            error_display: ErrorDisplay::Inline,
            show_busy_placeholder: true,
            status_dismiss_ms: 3000,
            submit_label: "Submit".to_string(),
            busy_label: "Processing...".to_string(),
        }
    }
}

impl AppSettings {
    pub fn parse_url(&self) -> String {
        format!("{}/api/parse", self.base_url.trim_end_matches('/'))
    }
}
