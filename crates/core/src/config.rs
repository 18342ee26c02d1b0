//! Global configuration constants for herbdb.
//!
//! Limits, defaults and keyword sets used by the query engine and the storage
//! layer. Runtime configuration (port, data directory, read policy) is handled
//! via CLI arguments and environment variables in the server binary.

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default directory holding `plants.json`, `admin_settings.json` and `logs.json`.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// File name of the plant collection inside the data directory.
pub const PLANTS_FILE: &str = "plants.json";

/// File name of the admin settings inside the data directory.
pub const SETTINGS_FILE: &str = "admin_settings.json";

/// File name of the activity log inside the data directory.
pub const LOG_FILE: &str = "logs.json";

/// Default page size for catalog queries.
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Largest page size accepted at the HTTP boundary. The query engine itself is unbounded.
pub const MAX_PER_PAGE: i64 = 1_000;

/// Precaution keywords that exclude a plant from "safe for pregnancy" results.
pub const PREGNANCY_KEYWORDS: [&str; 4] = ["pregnant", "pregnancy", "lactation", "breast"];

/// Precaution keyword that excludes a plant from "no interactions" results.
pub const INTERACTION_KEYWORD: &str = "interact";

/// Maximum number of ranked suggestions returned by `suggest`.
pub const MAX_SUGGESTIONS: usize = 10;

/// Maximum number of quick (common-name) suggestions.
pub const MAX_QUICK_SUGGESTIONS: usize = 5;

/// Minimum query length, in characters, for quick suggestions.
pub const MIN_QUICK_SUGGESTION_LEN: usize = 2;

/// Maximum number of autocomplete entries.
pub const MAX_AUTOCOMPLETE: usize = 10;

/// Number of plants shown as featured (most recently added).
pub const FEATURED_COUNT: usize = 6;

/// Minimum number of plant ids in a comparison request.
pub const MIN_COMPARE_IDS: usize = 2;

/// Activity log retention: only the newest entries are kept.
pub const MAX_LOG_ENTRIES: usize = 1_000;

/// Characters of a contact message copied into the activity log.
pub const CONTACT_LOG_PREVIEW_CHARS: usize = 100;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Global rate limit in requests per second.
pub const RATE_LIMIT_RPS: u64 = 200;

/// Maximum HTTP request body size in bytes (5 MB, enough for a full catalog replace).
pub const MAX_REQUEST_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of concurrent in-flight requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Interval between catalog gauge refreshes, in seconds.
pub const METRICS_REFRESH_SECS: u64 = 15;
