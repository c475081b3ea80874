use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TARGET_URL: &str = "https://learn.deeplearning.ai/courses/agent-skills-with-anthropic/lesson/bv2ekh/why-use-skills---part-i";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page to inspect
    pub target_url: String,
    /// Visible-text fragments that mean the page is behind a sign-in wall
    pub login_markers: Vec<String>,
    /// Seconds to keep the browser open after a successful inspection (0 disables)
    pub hold_open_secs: u64,
    pub browser: BrowserSettings,
    pub wait: WaitSettings,
}

/// Chromium launch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub user_agent: String,
    /// Hide `navigator.webdriver` and the automation infobar
    pub suppress_automation: bool,
    pub disable_gpu: bool,
    pub no_sandbox: bool,
    pub disable_dev_shm_usage: bool,
    pub extra_args: Vec<String>,
    /// Chromium binary; auto-detected when unset
    pub executable: Option<PathBuf>,
}

/// Readiness polling bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitSettings {
    pub page_load_timeout_secs: u64,
    pub video_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            login_markers: vec!["Sign in".to_string(), "Log in".to_string()],
            hold_open_secs: 30,
            browser: BrowserSettings::default(),
            wait: WaitSettings::default(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            suppress_automation: true,
            disable_gpu: true,
            no_sandbox: true,
            disable_dev_shm_usage: true,
            extra_args: Vec::new(),
            executable: None,
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self {
            page_load_timeout_secs: 20,
            video_timeout_secs: 10,
            poll_interval_ms: 250,
        }
    }
}

impl BrowserSettings {
    /// Command-line switches passed to Chromium, besides `--no-sandbox` and
    /// headless mode which the launcher sets itself.
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.suppress_automation {
            args.push("--disable-blink-features=AutomationControlled".to_string());
        }
        if !self.user_agent.is_empty() {
            args.push(format!("--user-agent={}", self.user_agent));
        }
        if self.disable_gpu {
            args.push("--disable-gpu".to_string());
        }
        if self.disable_dev_shm_usage {
            args.push("--disable-dev-shm-usage".to_string());
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl WaitSettings {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn video_timeout(&self) -> Duration {
        Duration::from_secs(self.video_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Config {
    /// Default config file location: `~/.playerscope/config.toml`
    pub fn default_path() -> PathBuf {
        let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home_dir.join(".playerscope").join("config.toml")
    }

    /// Load configuration from file; a missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn hold_open(&self) -> Duration {
        Duration::from_secs(self.hold_open_secs)
    }

    /// Parse `target_url`, rejecting anything that is not http(s).
    pub fn validated_target(&self) -> Result<url::Url> {
        let url = url::Url::parse(&self.target_url)
            .with_context(|| format!("invalid target URL: {}", self.target_url))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("unsupported URL scheme `{}` in {}", other, self.target_url),
        }
    }
}
