//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in the initial
//! migration. Roles gate event management and the admin surface only;
//! any authenticated user may register for events.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ORGANIZER: &str = "organizer";
pub const ROLE_PARTICIPANT: &str = "participant";
