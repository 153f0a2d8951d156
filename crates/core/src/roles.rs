//! Role names carried in the `role` claim of bearer tokens issued by the
//! identity provider.

/// Moderators who may create, edit, and override locations.
pub const ROLE_ADMIN: &str = "admin";
/// Regular app users who record votes.
pub const ROLE_USER: &str = "user";
