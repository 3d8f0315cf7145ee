/// User agent string used in HTTP requests to identify this client to marketplace APIs
pub const USER_AGENT: &str = "resale-desk/0.3.1";
/// Default delay in milliseconds between consecutive provider calls in batch loops
///
/// This is a politeness throttle, not a scheduler: batch sync and batch matching
/// sleep this long between items to stay clear of third-party rate limits.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 100;
/// Default number of days to look back when fetching sales/orders history
pub const DAYS_TO_BACK_LOOK: i64 = 30;
/// Default page size for provider API requests
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Maximum number of consecutive errors before a sync batch gives up on a provider
pub const MAX_CONSECUTIVE_ERRORS: u32 = 3;
/// Safety margin in seconds subtracted from OAuth token lifetimes before refreshing
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;
/// Base delay in milliseconds for exponential backoff on 429/5xx responses
pub const BACKOFF_BASE_DELAY_MS: u64 = 500;
/// Upper bound in milliseconds for a single backoff sleep
pub const BACKOFF_MAX_DELAY_MS: u64 = 30_000;
/// Relative spread of cross-provider asks above which an aggregated price is
/// flagged low confidence
pub const AGGREGATION_SPREAD_THRESHOLD: f64 = 0.25;
/// Maximum Levenshtein distance between normalized SKUs for a fuzzy SKU match
pub const FUZZY_SKU_MAX_DISTANCE: usize = 2;
/// Minimum mapping confidence required to accept a catalog match
pub const MATCH_CONFIDENCE_THRESHOLD: f64 = 0.80;
/// Minimum token-set similarity required for a fuzzy name match
pub const FUZZY_NAME_MIN_SIMILARITY: f64 = 0.85;
/// Default base currency for valuation and P/L reporting
pub const DEFAULT_BASE_CURRENCY: &str = "USD";
