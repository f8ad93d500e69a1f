use std::time::Duration;

use log::{debug, error, info};
use serde_json::Value;

use crate::{
    error::SubmitError,
    model::{Transcript, UiState},
    provider::ParseProvider,
    response::{interpret, render},
    settings::{AppSettings, ErrorDisplay},
    status::StatusIndicator,
    view::View,
};

const SUCCESS_MESSAGE: &str = "Transcript analyzed successfully!";
const CLEARED_MESSAGE: &str = "Cleared!";

/// Drives one submit/clear cycle at a time against a [`ParseProvider`],
/// mirroring every step onto a [`View`].
pub struct SubmissionController<P, V> {
    state: UiState,
    provider: P,
    view: V,
    status: StatusIndicator,
    settings: AppSettings,
}

impl<P: ParseProvider, V: View> SubmissionController<P, V> {
    pub fn new(provider: P, view: V, settings: AppSettings) -> Self {
        let status = StatusIndicator::new(Duration::from_millis(settings.status_dismiss_ms));
        Self {
            state: UiState::Idle,
            provider,
            view,
            status,
            settings,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    /// Runs one submit cycle. Failures are already shown on the view and
    /// status element when this returns; the result is handed back for
    /// callers that need the outcome.
    pub async fn submit(&mut self) -> Result<Value, SubmitError> {
        let transcript = match Transcript::parse(&self.view.input_text()) {
            Ok(transcript) => transcript,
            Err(err) => {
                self.report_failure(&err);
                return Err(err);
            }
        };

        self.begin();
        let outcome = self.request(&transcript).await;
        match &outcome {
            Ok(value) => {
                self.view.set_output_text(&render(value));
                self.status.success(SUCCESS_MESSAGE);
                info!("Transcript parsed by {}", self.provider.display_name());
            }
            Err(err) => self.report_failure(err),
        }
        self.finish();

        outcome
    }

    pub fn clear(&mut self) {
        self.view.set_input_text("");
        self.view.set_output_text("");
        self.view.focus_input();
        self.status.success(CLEARED_MESSAGE);
    }

    async fn request(&self, transcript: &Transcript) -> Result<Value, SubmitError> {
        let response = self.provider.parse(transcript).await?;
        interpret(&response, self.settings.response_mode)
    }

    fn begin(&mut self) {
        self.transition(UiState::Submitting);
        self.view.set_submit_enabled(false);
        self.view.set_submit_label(&self.settings.busy_label);
        if self.settings.show_busy_placeholder {
            self.view.set_output_text(&self.settings.busy_label);
        }
    }

    fn finish(&mut self) {
        self.view.set_submit_enabled(true);
        self.view.set_submit_label(&self.settings.submit_label);
        self.transition(UiState::Idle);
    }

    fn transition(&mut self, next: UiState) {
        debug!("{} -> {}", self.state.label(), next.label());
        self.state = next;
    }

    fn report_failure(&mut self, err: &SubmitError) {
        error!("Transcript submission failed: {}", err);
        let text = format!("ERROR: {}", err);
        match self.settings.error_display {
            ErrorDisplay::Inline => self.view.set_output_text(&text),
            ErrorDisplay::StatusOnly => self.view.set_output_text(""),
        }
        self.status.error(text);
    }
}
