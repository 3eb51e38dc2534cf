use recipebox_logging::{rb_debug, rb_info, rb_warn};

use crate::{Recipe, RemoteFailure, RequestId};

/// Backend error codes and the text shown for them.
pub const SUBMISSION_ERROR_MESSAGES: &[(&str, &str)] = &[
    ("MISSING_URL", "Please provide a valid URL."),
    ("REQUEST_FAILED", "Unable to load data from this page."),
    ("PARSE_FAILED", "Unable to extract a recipe from this page."),
];

pub const SUBMISSION_FALLBACK_MESSAGE: &str = "Unable to add recipe";

/// User-facing text for a failed submission.
pub fn submission_error_message(failure: &RemoteFailure) -> &'static str {
    let code = failure.code();
    SUBMISSION_ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
        .unwrap_or(SUBMISSION_FALLBACK_MESSAGE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Init,
    Loading,
    Complete,
    Error,
}

/// The add-a-recipe-by-URL flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Submission {
    url_input: String,
    status: SubmissionStatus,
    error: Option<String>,
    pending: Option<RequestId>,
}

impl Submission {
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_url_input(&mut self, text: String) {
        self.url_input = text;
    }

    /// Submitting needs non-empty text and an idle lifecycle.
    pub fn can_submit(&self) -> bool {
        !self.url_input.trim().is_empty()
            && matches!(
                self.status,
                SubmissionStatus::Init | SubmissionStatus::Complete
            )
    }

    /// Moves to `Loading` and returns the URL to send, or `None` when the
    /// submit is rejected.
    pub fn begin(&mut self, request: RequestId) -> Option<String> {
        if !self.can_submit() {
            rb_debug!(
                "Ignoring submit in status {:?} (input empty: {})",
                self.status,
                self.url_input.trim().is_empty()
            );
            return None;
        }
        self.status = SubmissionStatus::Loading;
        self.error = None;
        self.pending = Some(request);
        Some(self.url_input.trim().to_string())
    }

    /// Applies the backend's answer. Returns the new recipe for the collection
    /// on success; stale answers yield `None` and change nothing.
    pub fn resolve(
        &mut self,
        request: RequestId,
        result: Result<Recipe, RemoteFailure>,
    ) -> Option<Recipe> {
        if self.pending != Some(request) {
            rb_debug!("Dropping stale submission response request={}", request);
            return None;
        }
        self.pending = None;
        match result {
            Ok(recipe) => {
                rb_info!("Added recipe {} '{}'", recipe.id, recipe.name);
                self.status = SubmissionStatus::Complete;
                self.url_input.clear();
                Some(recipe)
            }
            Err(failure) => {
                rb_warn!("Submission failed: {}", failure);
                self.status = SubmissionStatus::Error;
                self.error = Some(submission_error_message(&failure).to_string());
                None
            }
        }
    }

    /// Clears an error and returns to `Init`. No effect in other states.
    pub fn dismiss(&mut self) -> bool {
        if self.status != SubmissionStatus::Error {
            return false;
        }
        self.status = SubmissionStatus::Init;
        self.error = None;
        true
    }
}
