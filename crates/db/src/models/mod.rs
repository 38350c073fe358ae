pub mod event;
pub mod payment;
pub mod registration;
pub mod user;
