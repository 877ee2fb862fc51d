//! Site endpoints: auth, reviews, quotes.

pub mod api;
pub mod types;

pub use api::SiteApi;
pub use types::{
    AuthSession, BudgetRange, ContactMethod, Credentials, NewReview, Quote, QuoteRequest, Registration, Review,
    ServiceType, Timeline, User,
};
