/// Default origin of the remote blog API
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Environment variable that overrides the configured origin
pub const BASE_URL_ENV_VAR: &str = "BLOGVIEW_BASE_URL";

/// Default timeout for HTTP requests in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "BlogView/0.1";

/// Default number of items per listing page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Number of posts sampled when collecting tags. Tags only used by later posts are not seen.
pub const TAG_SAMPLE_SIZE: usize = 100;

/// Page size used when looking up candidates for related posts
pub const RELATED_CANDIDATE_LIMIT: u32 = 20;

/// Default number of related posts shown under a post
pub const DEFAULT_RELATED_POSTS: usize = 3;

/// Number of top posts shown on the home page
pub const DEFAULT_FEATURED_POSTS: u32 = 6;

/// Maximum number of page links shown in a pagination bar
pub const PAGE_WINDOW_SIZE: u32 = 5;

/// Length at which post excerpts are cut
pub const EXCERPT_LENGTH: usize = 100;
