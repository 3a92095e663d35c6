//! Project submission form.
//!
//! There is no backend yet: a valid submission waits a fixed simulated delay,
//! reports success, then redirects to the project list after a second delay.
//! Neither delay can be cancelled.

use foundation::time::Time;
use runtime::Timeout;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::records::ProjectRecord;
use crate::routes::Route;

pub const SUBMIT_DELAY_S: f64 = 1.5;
pub const REDIRECT_DELAY_S: f64 = 2.0;
pub const SUCCESS_MESSAGE: &str = "Project submitted successfully! Redirecting to projects page...";

const PLACEHOLDER_COLORS: [&str; 5] = ["blue", "purple", "pink", "green", "yellow"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub username: String,
    pub social_link: String,
    pub title: String,
    pub project_link: String,
    pub description: String,
}

impl SubmissionForm {
    /// `username`, `title` and `description` are required; blank counts as missing.
    pub fn validate(&self) -> Result<(), SubmitError> {
        let missing = [&self.username, &self.title, &self.description]
            .iter()
            .any(|field| field.trim().is_empty());
        if missing {
            Err(SubmitError::MissingFields)
        } else {
            Ok(())
        }
    }

    /// `/sample-{color}.jpg`, picked by the title's first UTF-16 code unit.
    pub fn placeholder_image(&self) -> String {
        let unit = self.title.encode_utf16().next().unwrap_or(0) as usize;
        format!("/sample-{}.jpg", PLACEHOLDER_COLORS[unit % PLACEHOLDER_COLORS.len()])
    }

    /// The record this form would create. Id 0 means not yet stored.
    pub fn to_record(&self, created_at_ms: u64) -> ProjectRecord {
        ProjectRecord {
            id: 0,
            username: self.username.trim().to_string(),
            social_link: self.social_link.trim().to_string(),
            title: self.title.trim().to_string(),
            project_link: self.project_link.trim().to_string(),
            description: self.description.trim().to_string(),
            image_url: self.placeholder_image(),
            created_at_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    MissingFields,
    /// Something went wrong after validation passed.
    Failed(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::MissingFields => write!(f, "Please fill in all required fields."),
            SubmitError::Failed(_) => write!(
                f,
                "There was an error submitting your project. Please try again."
            ),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPhase {
    Editing { error: Option<SubmitError> },
    Submitting,
    Succeeded,
    Redirect(Route),
}

/// Submission page state, polled against the page clock.
#[derive(Debug, Clone)]
pub struct Submission {
    phase: SubmissionPhase,
    timer: Option<Timeout>,
    record: Option<ProjectRecord>,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    pub fn new() -> Self {
        Self {
            phase: SubmissionPhase::Editing { error: None },
            timer: None,
            record: None,
        }
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match &self.phase {
            SubmissionPhase::Editing { error } => error.as_ref(),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&'static str> {
        match self.phase {
            SubmissionPhase::Succeeded | SubmissionPhase::Redirect(_) => Some(SUCCESS_MESSAGE),
            _ => None,
        }
    }

    /// Where to navigate once the redirect delay has passed.
    pub fn redirect(&self) -> Option<&Route> {
        match &self.phase {
            SubmissionPhase::Redirect(route) => Some(route),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&ProjectRecord> {
        self.record.as_ref()
    }

    /// Validates and starts the simulated request. Ignored unless editing.
    pub fn submit(&mut self, form: &SubmissionForm, now: Time) -> Result<(), SubmitError> {
        if !matches!(self.phase, SubmissionPhase::Editing { .. }) {
            return Ok(());
        }
        if let Err(err) = form.validate() {
            self.phase = SubmissionPhase::Editing {
                error: Some(err.clone()),
            };
            return Err(err);
        }
        debug!(title = %form.title, "submitting project");
        self.record = Some(form.to_record(now.as_millis().max(0.0) as u64));
        self.phase = SubmissionPhase::Submitting;
        self.timer = Some(Timeout::new(now, SUBMIT_DELAY_S));
        Ok(())
    }

    /// Returns the page to navigate to once the redirect delay has passed.
    pub fn poll(&mut self, now: Time) -> Option<Route> {
        let fired = self.timer.as_mut().is_some_and(|t| t.poll(now));
        if !fired {
            return None;
        }
        match self.phase {
            SubmissionPhase::Submitting => {
                let succeeded_at = self.timer.map(|t| t.deadline()).unwrap_or(now);
                self.phase = SubmissionPhase::Succeeded;
                self.timer = Some(Timeout::new(succeeded_at, REDIRECT_DELAY_S));
                // Both delays may have elapsed within one poll.
                self.poll(now)
            }
            SubmissionPhase::Succeeded => {
                self.timer = None;
                self.phase = SubmissionPhase::Redirect(Route::Projects);
                Some(Route::Projects)
            }
            _ => None,
        }
    }

    /// Abandons an in-flight submission with the generic failure message.
    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "project submission failed");
        self.timer = None;
        self.phase = SubmissionPhase::Editing {
            error: Some(SubmitError::Failed(reason)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(title: &str) -> SubmissionForm {
        SubmissionForm {
            username: "ada".into(),
            title: title.into(),
            description: "An engine".into(),
            ..Default::default()
        }
    }

    #[test]
    fn requires_username_title_and_description() {
        assert_eq!(
            SubmissionForm::default().validate(),
            Err(SubmitError::MissingFields)
        );
        assert!(form("   ").validate().is_err());
        assert!(form("Analytical").validate().is_ok());
        assert_eq!(
            SubmitError::MissingFields.to_string(),
            "Please fill in all required fields."
        );
    }

    #[test]
    fn placeholder_follows_first_code_unit() {
        // 'A' = 65 -> 0 -> blue; 'B' = 66 -> purple; 'E' = 69 -> yellow
        assert_eq!(form("Analytical").placeholder_image(), "/sample-blue.jpg");
        assert_eq!(form("Bolt").placeholder_image(), "/sample-purple.jpg");
        assert_eq!(form("Echo").placeholder_image(), "/sample-yellow.jpg");
    }

    #[test]
    fn delays_then_redirects_to_projects() {
        let mut s = Submission::new();
        s.submit(&form("Analytical"), Time(10.0)).unwrap();
        assert!(s.is_submitting());
        assert_eq!(s.record().unwrap().image_url, "/sample-blue.jpg");

        assert_eq!(s.poll(Time(11.4)), None);
        assert!(s.is_submitting());
        assert_eq!(s.poll(Time(11.5)), None);
        assert_eq!(s.phase(), &SubmissionPhase::Succeeded);
        assert_eq!(s.success_message(), Some(SUCCESS_MESSAGE));

        assert_eq!(s.poll(Time(13.4)), None);
        assert_eq!(s.poll(Time(13.5)), Some(Route::Projects));
        assert_eq!(s.redirect(), Some(&Route::Projects));
        assert_eq!(s.poll(Time(20.0)), None);
    }

    #[test]
    fn late_poll_runs_both_delays() {
        let mut s = Submission::new();
        s.submit(&form("Analytical"), Time(0.0)).unwrap();
        assert_eq!(s.poll(Time(60.0)), Some(Route::Projects));
    }

    #[test]
    fn invalid_submit_stays_editing() {
        let mut s = Submission::new();
        assert!(s.submit(&SubmissionForm::default(), Time(0.0)).is_err());
        assert_eq!(s.error(), Some(&SubmitError::MissingFields));
        assert_eq!(s.poll(Time(5.0)), None);
        s.submit(&form("Analytical"), Time(1.0)).unwrap();
        assert_eq!(s.error(), None);
    }

    #[test]
    fn failure_shows_generic_message() {
        let mut s = Submission::new();
        s.submit(&form("Analytical"), Time(0.0)).unwrap();
        s.fail("network down");
        assert_eq!(
            s.error().unwrap().to_string(),
            "There was an error submitting your project. Please try again."
        );
        assert_eq!(s.poll(Time(10.0)), None);
    }
}
