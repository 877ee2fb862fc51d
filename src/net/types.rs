//! Wire types for the site's quote, review, and auth endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public profile returned alongside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: Option<User>,
}

// =============================================================================
// REVIEWS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub rating: u8,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReview {
    pub title: String,
    pub content: String,
    pub rating: u8,
}

// =============================================================================
// QUOTES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub project_details: String,
    pub preferred_contact_method: ContactMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

/// A stored quote request as echoed back by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Declares a string-valued option set shared by the quote form and the wire.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str() == raw.trim())
                    .ok_or_else(|| {
                        let expected = Self::ALL.iter().map(|o| o.as_str()).collect::<Vec<_>>().join(", ");
                        format!("unknown {} '{raw}' (expected one of: {expected})", stringify!($name))
                    })
            }
        }
    };
}

option_set!(
    /// Kind of work a quote is for.
    ServiceType {
        ExteriorTrim => "exterior-trim",
        CustomWork => "custom-work",
        Repair => "repair",
        Other => "other",
    }
);

option_set!(
    ContactMethod {
        Email => "email",
        Phone => "phone",
    }
);

option_set!(
    BudgetRange {
        Under5k => "under-5k",
        From5kTo10k => "5k-10k",
        From10kTo20k => "10k-20k",
        Over20k => "over-20k",
    }
);

option_set!(
    /// When the customer wants the work started.
    Timeline {
        Asap => "asap",
        OneToThreeMonths => "1-3-months",
        ThreeToSixMonths => "3-6-months",
        Flexible => "flexible",
    }
);

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
