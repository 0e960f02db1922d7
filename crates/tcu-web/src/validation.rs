//! Form schemas.
//!
//! Each form deserializes from the urlencoded body with every field optional
//! and is then validated as a whole, so all field errors come back at once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tcu_types::api::{LoginRequest, SendMessageRequest, UpdateUserRequest};

/// Field name → message, for re-rendering a form with inline errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, &'static str>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        // first failing rule wins
        self.errors.entry(field).or_insert(message);
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn into_result<T>(self, ok: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(ok) } else { Err(self) }
    }
}

/// Loose email check: one `@`, a dotted domain, no whitespace or empty labels.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, message: &'static str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn email(errors: &mut FieldErrors, value: &str) {
    if !is_valid_email(value) {
        errors.insert("email", "Please enter a valid email address");
    }
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// -- Contact --

pub const CONTACT_PREFERENCES: &[&str] = &["facebook", "twitter", "instagram", "whatsapp"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub country: String,
    pub job_title: String,
    pub job_details: String,
    pub contact_preference: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<SendMessageRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "firstName", &self.first_name, "First name is required");
        required(&mut errors, "lastName", &self.last_name, "Last name is required");
        email(&mut errors, &self.email);
        if self.phone.trim().chars().count() < 6 {
            errors.insert("phone", "Please enter a valid phone number");
        }
        required(&mut errors, "companyName", &self.company_name, "Company name is required");
        required(&mut errors, "country", &self.country, "Please select a country");
        required(&mut errors, "jobTitle", &self.job_title, "Job title is required");

        let preference = optional(&self.contact_preference);
        if let Some(p) = &preference {
            if !CONTACT_PREFERENCES.contains(&p.as_str()) {
                errors.insert("contactPreference", "Please choose a listed contact channel");
            }
        }

        errors.into_result(SendMessageRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            country: self.country.trim().to_string(),
            job_title: self.job_title.trim().to_string(),
            job_details: optional(&self.job_details),
            contact_preference: preference,
        })
    }
}

/// One-time code typed by the visitor.
pub fn validate_otp_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim();
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(code.to_string())
    } else {
        Err("Please enter the 6-digit code")
    }
}

// -- Login --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        email(&mut errors, &self.email);
        if self.password.chars().count() < 6 {
            errors.insert("password", "Password must be at least 6 characters");
        }
        errors.into_result(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

// -- Checkout --

pub const CHECKOUT_COUNTRIES: &[&str] =
    &["South Africa", "United States", "United Kingdom", "Canada", "Australia"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
    /// Checkbox: present ("on") only when ticked. An absent field must stay
    /// `None` rather than take the pre-ticked default.
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    pub card_number: String,
    pub expiration: String,
    pub cvc: String,
    pub card_country: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            country: "South Africa".to_string(),
            terms_and_conditions: Some("on".to_string()),
            card_number: String::new(),
            expiration: String::new(),
            cvc: String::new(),
            card_country: "South Africa".to_string(),
        }
    }
}

impl CheckoutForm {
    pub fn terms_accepted(&self) -> bool {
        matches!(self.terms_and_conditions.as_deref(), Some("on" | "true" | "1"))
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "firstName", &self.first_name, "First name is required");
        required(&mut errors, "lastName", &self.last_name, "Last name is required");
        email(&mut errors, &self.email);
        required(&mut errors, "country", &self.country, "Country is required");
        if !self.terms_accepted() {
            errors.insert("termsAndConditions", "You must accept the terms and conditions");
        }

        required(&mut errors, "cardNumber", &self.card_number, "Card number is required");
        if !is_card_number(&self.card_number) {
            errors.insert("cardNumber", "Card number must be in format XXXX XXXX XXXX XXXX");
        }
        required(&mut errors, "expiration", &self.expiration, "Expiration date is required");
        if !is_expiration(&self.expiration) {
            errors.insert("expiration", "Expiration date must be in format MM/YY");
        }
        required(&mut errors, "cvc", &self.cvc, "CVC is required");
        if !is_cvc(&self.cvc) {
            errors.insert("cvc", "CVC must be 3 or 4 digits");
        }
        required(&mut errors, "cardCountry", &self.card_country, "Card country is required");

        errors.into_result(())
    }
}

/// Four groups of four digits separated by single spaces.
fn is_card_number(value: &str) -> bool {
    let groups: Vec<&str> = value.split(' ').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| g.len() == 4 && g.bytes().all(|b| b.is_ascii_digit()))
}

/// `MM/YY` with month 01-12; one optional whitespace on either side of `/`.
fn is_expiration(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    let month = month.strip_suffix(char::is_whitespace).unwrap_or(month);
    let year = year.strip_prefix(char::is_whitespace).unwrap_or(year);
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}

fn is_cvc(value: &str) -> bool {
    (3..=4).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

// -- Users --

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserForm {
    pub fn validate(&self, id: &str) -> Result<UpdateUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "name", &self.name, "Name is required");
        email(&mut errors, &self.email);
        if !matches!(self.role.as_str(), "1" | "2") {
            errors.insert("role", "Please select a role");
        }
        errors.into_result(UpdateUserRequest {
            id: id.to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.clone(),
        })
    }
}

// -- Reply --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplyForm {
    pub reply_text: String,
}

impl ReplyForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::new();
        required(&mut errors, "replyText", &self.reply_text, "Reply text is required");
        errors.into_result(self.reply_text.trim().to_string())
    }
}
