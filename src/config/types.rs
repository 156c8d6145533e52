use serde::Deserialize;

/// Main configuration structure for Shelf-Scrape
///
/// Every section is optional in the TOML file; missing sections fall back to
/// their `Default` values, so an empty file is equivalent to no file at all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub wiki: WikiConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Extra title overrides, applied on top of the built-in ones
    #[serde(rename = "skip-override", default)]
    pub skip_overrides: Vec<SkipOverrideEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of item pages fetched at once within a floor
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Attempts per item page or floor before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds), doubled for each further retry
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Upper bound on the retry delay (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "shelf-scrape".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/shelf-scrape/shelf-scrape".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Where the wiki lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Scheme and host the floor and item paths are joined onto
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix every article link starts with
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lorelibrary.fandom.com".to_string(),
            article_prefix: "/wiki/".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indent the JSON array instead of writing it on one line
    pub pretty: bool,
}

/// Title override: skip `extra_skip` more siblings before the acquisition block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkipOverrideEntry {
    pub title: String,

    #[serde(rename = "extra-skip")]
    pub extra_skip: usize,
}
