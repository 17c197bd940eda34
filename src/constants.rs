//! Application constants

/// Default video-info API endpoint
pub const DEFAULT_TIKWM_API_URL: &str = "https://tikwm.com/api";

/// Base path for playable HD media, the video id and extension are appended
pub const MEDIA_BASE_URL: &str = "https://www.tikwm.com/video/media/hdplay/";

/// File extension appended to media URLs
pub const MEDIA_EXTENSION: &str = ".mp4";

/// Browser-like User-Agent sent to the video-info API
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default outbound HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default Postgres pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
