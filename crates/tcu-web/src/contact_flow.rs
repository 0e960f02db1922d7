//! Contact-form verification flow: form → one-time code → sent.
//!
//! The state machine is pure: callers perform the API calls and report the
//! outcome back through the transition methods. Time is passed in so the
//! resend cooldown is testable.

use std::time::{Duration, Instant};

use thiserror::Error;

use tcu_types::api::SendMessageRequest;

use crate::validation::{ContactForm, FieldErrors, validate_otp_code};

/// Minimum gap between two code requests.
pub const RESEND_COOLDOWN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStage {
    pub values: ContactForm,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationStage {
    pub values: ContactForm,
    pub submission: SendMessageRequest,
    pub code_sent_at: Instant,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactFlow {
    Form(FormStage),
    Verification(VerificationStage),
    Success,
}

impl Default for ContactFlow {
    fn default() -> Self {
        ContactFlow::Form(FormStage::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("no verification is in progress")]
    NotVerifying,
    #[error("Please wait {0} seconds before requesting a new code")]
    CoolingDown(u64),
    #[error("{0}")]
    InvalidCode(&'static str),
}

impl ContactFlow {
    pub fn stage_name(&self) -> &'static str {
        match self {
            ContactFlow::Form(_) => "form",
            ContactFlow::Verification(_) => "verification",
            ContactFlow::Success => "success",
        }
    }

    /// Validate a submitted form. Invalid input keeps the flow on the form
    /// with the entered values and field errors; valid input yields the
    /// submission to request a code for.
    pub fn validate_form(&mut self, values: ContactForm) -> Option<SendMessageRequest> {
        match values.validate() {
            Ok(submission) => Some(submission),
            Err(errors) => {
                *self = ContactFlow::Form(FormStage { values, errors });
                None
            }
        }
    }

    /// Keep the entered values on the form without errors (code request failed).
    pub fn stay_on_form(&mut self, values: ContactForm) {
        *self = ContactFlow::Form(FormStage { values, errors: FieldErrors::new() });
    }

    /// A code was sent for `submission`; start the cooldown.
    pub fn code_sent(&mut self, values: ContactForm, submission: SendMessageRequest, now: Instant) {
        *self = ContactFlow::Verification(VerificationStage {
            values,
            submission,
            code_sent_at: now,
            error: None,
        });
    }

    /// Seconds left before a resend is allowed; `None` outside verification.
    pub fn cooldown_remaining(&self, now: Instant) -> Option<u64> {
        let ContactFlow::Verification(v) = self else {
            return None;
        };
        let elapsed = now.saturating_duration_since(v.code_sent_at);
        let left = RESEND_COOLDOWN.saturating_sub(elapsed);
        // round up so "0 seconds left" only shows once it is really over
        Some(left.as_millis().div_ceil(1000) as u64)
    }

    /// Check a resend is allowed; returns the email to send the code to.
    pub fn begin_resend(&self, now: Instant) -> Result<String, FlowError> {
        let ContactFlow::Verification(v) = self else {
            return Err(FlowError::NotVerifying);
        };
        match self.cooldown_remaining(now) {
            Some(left) if left > 0 => Err(FlowError::CoolingDown(left)),
            _ => Ok(v.submission.email.clone()),
        }
    }

    /// A new code went out; restart the cooldown.
    pub fn resent(&mut self, now: Instant) {
        if let ContactFlow::Verification(v) = self {
            v.code_sent_at = now;
            v.error = None;
        }
    }

    /// Check the typed code's format; returns the code and the submission.
    pub fn begin_verify(&mut self, code: &str) -> Result<(String, SendMessageRequest), FlowError> {
        let ContactFlow::Verification(v) = self else {
            return Err(FlowError::NotVerifying);
        };
        match validate_otp_code(code) {
            Ok(code) => Ok((code, v.submission.clone())),
            Err(message) => {
                v.error = Some(message.to_string());
                Err(FlowError::InvalidCode(message))
            }
        }
    }

    /// Verification or submission failed; stay on the code screen.
    pub fn verification_failed(&mut self, message: impl Into<String>) {
        if let ContactFlow::Verification(v) = self {
            v.error = Some(message.into());
        }
    }

    pub fn submitted(&mut self) {
        *self = ContactFlow::Success;
    }

    /// Back from the code screen to the form, keeping what was typed.
    pub fn back(&mut self) -> Result<(), FlowError> {
        let ContactFlow::Verification(v) = self else {
            return Err(FlowError::NotVerifying);
        };
        let values = std::mem::take(&mut v.values);
        *self = ContactFlow::Form(FormStage { values, errors: FieldErrors::new() });
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = ContactFlow::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> ContactForm {
        ContactForm {
            first_name: "Aye".into(),
            last_name: "Chan".into(),
            email: "aye@example.com".into(),
            phone: "+959123456".into(),
            company_name: "TCU".into(),
            country: "Myanmar".into(),
            job_title: "Facilities".into(),
            job_details: "Warehouse cameras".into(),
            contact_preference: String::new(),
        }
    }

    fn verifying(now: Instant) -> ContactFlow {
        let mut flow = ContactFlow::default();
        let submission = flow.validate_form(values()).unwrap();
        flow.code_sent(values(), submission, now);
        flow
    }

    #[test]
    fn invalid_form_stays_on_form_with_errors() {
        let mut flow = ContactFlow::default();
        let mut bad = values();
        bad.email = "nope".into();
        assert!(flow.validate_form(bad.clone()).is_none());
        match &flow {
            ContactFlow::Form(stage) => {
                assert_eq!(stage.values, bad);
                assert!(stage.errors.get("email").is_some());
            }
            other => panic!("unexpected stage {}", other.stage_name()),
        }
    }

    #[test]
    fn valid_form_moves_to_verification_once_code_is_sent() {
        let now = Instant::now();
        let flow = verifying(now);
        assert_eq!(flow.stage_name(), "verification");
        assert_eq!(flow.cooldown_remaining(now), Some(60));
    }

    #[test]
    fn resend_respects_cooldown() {
        let start = Instant::now();
        let mut flow = verifying(start);

        let err = flow.begin_resend(start + Duration::from_millis(30_500)).unwrap_err();
        assert_eq!(err, FlowError::CoolingDown(30));
        assert_eq!(err.to_string(), "Please wait 30 seconds before requesting a new code");

        let later = start + Duration::from_secs(60);
        assert_eq!(flow.begin_resend(later).unwrap(), "aye@example.com");
        flow.resent(later);
        assert_eq!(flow.cooldown_remaining(later + Duration::from_secs(1)), Some(59));
    }

    #[test]
    fn resend_outside_verification_is_rejected() {
        let flow = ContactFlow::default();
        assert_eq!(flow.begin_resend(Instant::now()), Err(FlowError::NotVerifying));
        assert_eq!(flow.cooldown_remaining(Instant::now()), None);
    }

    #[test]
    fn malformed_code_records_error() {
        let mut flow = verifying(Instant::now());
        assert_eq!(
            flow.begin_verify("12"),
            Err(FlowError::InvalidCode("Please enter the 6-digit code"))
        );
        let ContactFlow::Verification(v) = &flow else { panic!("left verification") };
        assert_eq!(v.error.as_deref(), Some("Please enter the 6-digit code"));
    }

    #[test]
    fn verified_code_then_submission_reaches_success() {
        let mut flow = verifying(Instant::now());
        let (code, submission) = flow.begin_verify("654321").unwrap();
        assert_eq!(code, "654321");
        assert_eq!(submission.job_details.as_deref(), Some("Warehouse cameras"));

        flow.verification_failed("Invalid code");
        let ContactFlow::Verification(v) = &flow else { panic!("left verification") };
        assert_eq!(v.error.as_deref(), Some("Invalid code"));

        flow.submitted();
        assert_eq!(flow, ContactFlow::Success);
        flow.reset();
        assert_eq!(flow, ContactFlow::default());
    }

    #[test]
    fn back_returns_to_form_with_values() {
        let mut flow = verifying(Instant::now());
        flow.back().unwrap();
        match &flow {
            ContactFlow::Form(stage) => {
                assert_eq!(stage.values, values());
                assert!(stage.errors.is_empty());
            }
            other => panic!("unexpected stage {}", other.stage_name()),
        }
        assert_eq!(flow.back(), Err(FlowError::NotVerifying));
    }
}
