//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Header carrying the caller's asserted staff role
pub const USER_ROLE_HEADER: &str = "X-User-Role";

// =============================================================================
// Staff Roles
// =============================================================================

/// Main administrator, the only role allowed to manage staff accounts
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Administrator role
pub const ROLE_ADMIN: &str = "admin";

/// Manager role
pub const ROLE_MANAGER: &str = "manager";

/// Operator role
pub const ROLE_OPERATOR: &str = "operator";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_MANAGER, ROLE_OPERATOR];

// =============================================================================
// Bookings
// =============================================================================

/// Status assigned to every freshly submitted booking
pub const BOOKING_STATUS_NEW: &str = "new";

/// Status a new booking moves to once a staff member is assigned
pub const BOOKING_STATUS_ASSIGNED: &str = "assigned";

/// Accepted input formats for the desired booking time
pub const BOOKING_TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Output format for the desired booking time
pub const BOOKING_TIME_OUTPUT_FORMAT: &str = "%H:%M";

/// Format for the desired booking date
pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for a booking's submission time
pub const BOOKING_CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Service Catalog
// =============================================================================

/// Icon used when a catalog entry is created without one
pub const DEFAULT_SERVICE_ICON: &str = "Building2";

// =============================================================================
// CORS
// =============================================================================

/// How long browsers may cache a preflight answer
pub const CORS_MAX_AGE_SECONDS: u32 = 86400;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Notifications (SMTP)
// =============================================================================

/// Default SMTP submission port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP port that uses implicit TLS
pub const SMTPS_PORT: u16 = 465;

/// Default sender address for notification mails
pub const DEFAULT_SMTP_FROM: &str = "noreply@example.com";
