use serde::{Deserialize, Serialize};

/// A back-office user as returned by the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    pub fn role(&self) -> Role {
        Role::from_code(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    /// First letter of the name, upper-cased, for the avatar badge.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "A".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Staff,
    Unknown,
}

impl Role {
    pub fn from_code(code: &str) -> Self {
        match code {
            "1" => Role::Admin,
            "2" => Role::Staff,
            _ => Role::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Role::Admin => "1",
            Role::Staff => "2",
            Role::Unknown => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Unknown => "Unknown",
        }
    }
}

/// Logged-in user plus the access token issued by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub user: User,
    pub token: String,
}

/// A customer query submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInfo {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub country: String,
    pub job_title: String,
    #[serde(default)]
    pub job_details: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: String,
}

impl MessageInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
