//! `quotevend-sheets` — Google Sheets v4 adapter for the tabular-store port.
//!
//! Speaks the spreadsheet REST API directly over `reqwest`, authenticated
//! with a service-account access token (RS256 JWT assertion). One
//! [`SheetsTable`] per worksheet; both share a [`auth::TokenProvider`].

pub mod auth;
pub mod table;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use table::{connect, SheetsConfig, SheetsTable};
