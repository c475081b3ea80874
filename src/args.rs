use crate::config::Config;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

// Command-line surface. Every option except `--config` and the output
// switches overrides the matching config.toml value.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "playerscope",
    version,
    about = "Inspect a page's video player, text tracks and subtitle cues"
)]
pub struct Args {
    /// Page to inspect (default: `target_url` from config)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Path to a config.toml file
    #[arg(short = 'c', long, value_name = "PATH", env = "PLAYERSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run Chromium without a window
    #[arg(long, action = ArgAction::SetTrue)]
    pub headless: bool,

    /// Seconds to keep the browser open after inspecting (0 closes at once)
    #[arg(long = "hold", value_name = "SECS")]
    pub hold_open_secs: Option<u64>,

    /// User-Agent string sent by the browser
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Chromium executable
    #[arg(long, value_name = "PATH", env = "PLAYERSCOPE_CHROME")]
    pub chrome: Option<PathBuf>,

    /// Print the outcome as JSON instead of the text report
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Disable coloured terminal output
    #[arg(long = "no-color", action = ArgAction::SetTrue, env = "NO_COLOR")]
    pub no_color: bool,

    /// Debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

impl Args {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.target_url = url.clone();
        }

        if self.headless {
            config.browser.headless = true;
        }

        if let Some(secs) = self.hold_open_secs {
            config.hold_open_secs = secs;
        }

        if let Some(ua) = &self.user_agent {
            config.browser.user_agent = ua.clone();
        }

        if let Some(chrome) = &self.chrome {
            config.browser.executable = Some(chrome.clone());
        }
    }
}
