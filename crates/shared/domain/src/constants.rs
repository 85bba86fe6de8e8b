//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Role with full administrative access
pub const ROLE_ADMINISTRATOR: &str = "Administrator";

/// Regular helpdesk user
pub const ROLE_USER: &str = "User";

/// Role assigned to directory accounts provisioned on first login
pub const DEFAULT_ROLE: &str = ROLE_USER;

/// Roles seeded by the initial migration
pub const SEEDED_ROLES: &[&str] = &[ROLE_ADMINISTRATOR, ROLE_USER];

// =============================================================================
// Authentication modes
// =============================================================================

/// Local credential store (password hash in the users table)
pub const MODE_LOCAL: &str = "local";

/// Directory service (Active Directory / LDAP)
pub const MODE_DIRECTORY: &str = "directory";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement for locally created accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;
