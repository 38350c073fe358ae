//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod events;
pub mod payments;
pub mod registrations;
pub mod users;
