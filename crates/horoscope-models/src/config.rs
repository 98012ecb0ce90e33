use serde::{Deserialize, Serialize};

/// Top-level configuration shared by the session and loader binaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct HoroscopeConfig {
    pub cache: CacheConfig,
    pub feed: FeedConfig,
    pub display: DisplayConfig,
    pub colors: ColorConfig,
}

/// Configuration for the shared key-value cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Path to the SQLite database holding the `users` and `horoscope` tables.
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    /// Maximum number of records kept in the in-process hot cache.
    #[serde(default = "default_memory_max_capacity")]
    pub memory_max_capacity: u64,
    /// How long a record stays in the hot cache, in seconds.
    #[serde(default = "default_memory_ttl")]
    pub memory_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sqlite_path: default_sqlite_path(),
            memory_max_capacity: default_memory_max_capacity(),
            memory_ttl_seconds: default_memory_ttl(),
        }
    }
}

/// Configuration for the remote horoscope feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Upper bound on the wrap width; the terminal width minus one is used
    /// when that is smaller.
    #[serde(default = "default_max_wrap_width")]
    pub max_wrap_width: u16,
    /// How long an error message stays on screen, in milliseconds.
    #[serde(default = "default_error_pause_ms")]
    pub error_pause_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_wrap_width: default_max_wrap_width(),
            error_pause_ms: default_error_pause_ms(),
        }
    }
}

/// Named color options. Each value is a style spec such as `bold_bright_white`
/// or `bright_white_on_blue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub prompt_lowlight_color: String,
    pub prompt_highlight_color: String,
    pub lightbar_border_color: String,
    pub lightbar_lowlight_color: String,
    pub lightbar_highlight_color: String,
    pub header_highlight_color: String,
    pub header_lowlight_color: String,
    pub text_highlight_color: String,
    pub text_lowlight_color: String,
    pub error_color: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            prompt_lowlight_color: "bright_blue".to_string(),
            prompt_highlight_color: "bold_bright_white".to_string(),
            lightbar_border_color: "blue".to_string(),
            lightbar_lowlight_color: "white".to_string(),
            lightbar_highlight_color: "bright_white_on_blue".to_string(),
            header_highlight_color: "white".to_string(),
            header_lowlight_color: "blue".to_string(),
            text_highlight_color: "bold_underline_bright_white".to_string(),
            text_lowlight_color: "white".to_string(),
            error_color: "bright_red".to_string(),
        }
    }
}

impl ColorConfig {
    /// `(option name, spec)` pairs, used for validation messages.
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("prompt_lowlight_color", &self.prompt_lowlight_color),
            ("prompt_highlight_color", &self.prompt_highlight_color),
            ("lightbar_border_color", &self.lightbar_border_color),
            ("lightbar_lowlight_color", &self.lightbar_lowlight_color),
            ("lightbar_highlight_color", &self.lightbar_highlight_color),
            ("header_highlight_color", &self.header_highlight_color),
            ("header_lowlight_color", &self.header_lowlight_color),
            ("text_highlight_color", &self.text_highlight_color),
            ("text_lowlight_color", &self.text_lowlight_color),
            ("error_color", &self.error_color),
        ]
    }
}

fn default_sqlite_path() -> String {
    "data/horoscope.db".to_string()
}
fn default_memory_max_capacity() -> u64 {
    64
}
fn default_memory_ttl() -> u64 {
    300
}
fn default_feed_url() -> String {
    "http://www.api.littleastro.com/public/xiaoerge_haliphax_horoscope.php".to_string()
}
fn default_max_wrap_width() -> u16 {
    79
}
fn default_error_pause_ms() -> u64 {
    3000
}
