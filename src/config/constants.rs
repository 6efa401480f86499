//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default bearer token lifetime in days
pub const DEFAULT_JWT_EXPIRATION_DAYS: i64 = 30;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per day (for token expiration calculation)
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://restaurant.db?mode=rwc";

// =============================================================================
// Orders
// =============================================================================

/// Status assigned to every newly placed order
pub const ORDER_STATUS_RECEIVED: &str = "Received";

/// Smallest quantity a line item may carry
pub const MIN_LINE_QUANTITY: i32 = 1;

/// Largest amount a `decimal(10,2)` money column can hold
pub const MAX_MONEY_CENTS: i64 = 9_999_999_999;
