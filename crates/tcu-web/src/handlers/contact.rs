use std::time::Instant;

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::contact_flow::FlowError;
use crate::session::{Flash, SessionId};
use crate::state::AppState;
use crate::validation::ContactForm;
use crate::views::public;

use super::message_or;

const CONTACT_PATH: &str = "/contactus";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyForm {
    pub code: String,
}

pub async fn show(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Html<String> {
    let flash = state.sessions.take_flash(&session);
    let flow = state.sessions.get(&session).map(|s| s.contact).unwrap_or_default();
    let cooldown = flow.cooldown_remaining(Instant::now());
    Html(public::contact(&flow, cooldown, &flash))
}

/// Validate the form and email a verification code.
pub async fn submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(values): Form<ContactForm>,
) -> Redirect {
    let validated = state
        .sessions
        .update(&session, |s| s.contact.validate_form(values.clone()))
        .flatten();
    let Some(submission) = validated else {
        return Redirect::to(CONTACT_PATH);
    };

    match state.api.request_otp(&submission.email).await {
        Ok(reply) => {
            info!("Verification code sent to {}", submission.email);
            state.sessions.update(&session, |s| s.contact.code_sent(values, submission, Instant::now()));
            state.sessions.push_flash(
                &session,
                Flash::success(message_or(reply.message, "Verification code sent to your email")),
            );
        }
        Err(e) => {
            warn!("Requesting verification code failed: {}", e);
            state.sessions.update(&session, |s| s.contact.stay_on_form(values));
            state.sessions.push_flash(
                &session,
                Flash::error(e.api_message().unwrap_or("Failed to send verification code")),
            );
        }
    }
    Redirect::to(CONTACT_PATH)
}

/// Check the code, then deliver the query.
pub async fn verify(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<VerifyForm>,
) -> Redirect {
    let started = state.sessions.update(&session, |s| s.contact.begin_verify(&form.code));
    let (code, submission) = match started {
        Some(Ok(pair)) => pair,
        Some(Err(e)) => {
            debug!("Verification not started: {}", e);
            return Redirect::to(CONTACT_PATH);
        }
        None => return Redirect::to(CONTACT_PATH),
    };

    if let Err(e) = state.api.verify_otp(&submission.email, &code).await {
        warn!("Code verification failed for {}: {}", submission.email, e);
        let message = e.api_message().unwrap_or("Invalid or expired verification code").to_string();
        state.sessions.update(&session, |s| s.contact.verification_failed(message));
        return Redirect::to(CONTACT_PATH);
    }

    match state.api.send_message(&submission).await {
        Ok(reply) => {
            info!("Customer query from {} delivered", submission.email);
            state.sessions.update(&session, |s| s.contact.submitted());
            state.sessions.push_flash(
                &session,
                Flash::success(message_or(reply.message, "Your message has been sent")),
            );
        }
        Err(e) => {
            error!("Sending customer query failed: {}", e);
            let message = e.api_message().unwrap_or("Failed to send your message").to_string();
            state.sessions.update(&session, |s| s.contact.verification_failed(message));
        }
    }
    Redirect::to(CONTACT_PATH)
}

pub async fn resend(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Redirect {
    let check = state.sessions.get(&session).map(|s| s.contact.begin_resend(Instant::now()));
    match check {
        Some(Ok(email)) => match state.api.request_otp(&email).await {
            Ok(reply) => {
                state.sessions.update(&session, |s| s.contact.resent(Instant::now()));
                state.sessions.push_flash(
                    &session,
                    Flash::success(message_or(reply.message, "A new verification code has been sent")),
                );
            }
            Err(e) => {
                warn!("Resending verification code failed: {}", e);
                state.sessions.push_flash(
                    &session,
                    Flash::error(e.api_message().unwrap_or("Failed to resend verification code")),
                );
            }
        },
        Some(Err(e @ FlowError::CoolingDown(_))) => {
            state.sessions.push_flash(&session, Flash::error(e.to_string()));
        }
        Some(Err(e)) => debug!("Resend ignored: {}", e),
        None => {}
    }
    Redirect::to(CONTACT_PATH)
}

pub async fn back(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Redirect {
    if let Some(Err(e)) = state.sessions.update(&session, |s| s.contact.back()) {
        debug!("Back ignored: {}", e);
    }
    Redirect::to(CONTACT_PATH)
}

pub async fn reset(State(state): State<AppState>, Extension(session): Extension<SessionId>) -> Redirect {
    state.sessions.update(&session, |s| s.contact.reset());
    Redirect::to(CONTACT_PATH)
}
