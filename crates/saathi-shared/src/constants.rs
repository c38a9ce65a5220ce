/// Application name
pub const APP_NAME: &str = "Saathi";

/// Default REST API base URL. Override with `SAATHI_API_URL`.
pub const DEFAULT_API_BASE_URL: &str = "https://api.saathi.app/api/v1";

/// Access token lifetime. The backend issues same-day tokens.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Maximum chat message length accepted client-side.
pub const MAX_MESSAGE_LEN: usize = 4_000;
