//! Client side of the EVE Online SSO authorization code flow with PKCE
pub mod config;
pub mod models;
pub mod api;
