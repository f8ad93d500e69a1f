/// The widgets a submission controller drives: an input field, an output
/// field and a submit control. The status element lives in
/// [`crate::status::StatusIndicator`] because its timers outlive a call.
pub trait View {
    fn input_text(&self) -> String;
    fn set_input_text(&mut self, text: &str);
    fn output_text(&self) -> String;
    fn set_output_text(&mut self, text: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn is_submit_enabled(&self) -> bool;
    fn set_submit_label(&mut self, label: &str);
    fn focus_input(&mut self);
}

/// Plain in-memory widget state. Backs the terminal front end and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub input: String,
    pub output: String,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub input_focused: bool,
}

impl FieldView {
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            submit_enabled: true,
            submit_label: submit_label.into(),
            input_focused: false,
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }
}

impl View for FieldView {
    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn set_input_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn output_text(&self) -> String {
        self.output.clone()
    }

    fn set_output_text(&mut self, text: &str) {
        self.output = text.to_string();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }
}
