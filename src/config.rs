use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".challenge-bot.toml";

/// Account the hosting CI uses for automation-created PRs and comments.
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .challenge-bot.toml.
/// All fields are optional; the bot runs with zero config inside GitHub Actions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub playground: PlaygroundConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// REST endpoint root. If None, falls back to GITHUB_API_URL, then api.github.com.
    pub api_url: Option<String>,
    /// Host part of the `<id>+<login>@<host>` commit email.
    pub noreply_host: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: None,
            noreply_host: "users.noreply.github.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Automation identity used to recognise the bot's own PRs and comments
    pub login: String,
    /// Issues without this label are ignored
    pub trigger_label: String,
    /// Label attached to every PR the bot opens
    pub pr_label: String,
    /// Branch new PRs target and fresh branches start from
    pub base_branch: String,
    /// Root directory the generated question folders live in
    pub questions_dir: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            login: DEFAULT_BOT_LOGIN.to_string(),
            trigger_label: "new-challenge".to_string(),
            pr_label: "auto-generated".to_string(),
            base_branch: "main".to_string(),
            questions_dir: "questions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub url: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            url: "https://www.typescriptlang.org/play".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from .challenge-bot.toml in the current
    /// directory. Returns default config if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            Config::default()
        };

        if config.github.token.is_none() {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                config.github.token = Some(token);
            }
        }
        if config.github.api_url.is_none() {
            if let Ok(api_url) = std::env::var("GITHUB_API_URL") {
                config.github.api_url = Some(api_url);
            }
        }

        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn api_url(&self) -> &str {
        self.github
            .api_url
            .as_deref()
            .unwrap_or("https://api.github.com")
            .trim_end_matches('/')
    }
}
