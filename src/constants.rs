//! Application-wide constants
//!
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Per-request timeout in seconds
pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a pooled connection before failing
pub const DATABASE_ACQUIRE_TIMEOUT_SECONDS: u64 = 5;

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Role identifiers carried in the JWT `role` claim
pub mod roles {
    pub const ADMIN: &str = "admin";
}

/// Authorization header scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

// =============================================================================
// ENGINE LIMITS
// =============================================================================

/// Longest completion time that can be recorded (7 days)
pub const MAX_ELAPSED_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Largest points award for a single stage
pub const MAX_STAGE_POINTS: i32 = 100_000;

/// Length of a hex-encoded SHA-256 plan fingerprint
pub const FINGERPRINT_LENGTH: u64 = 64;
