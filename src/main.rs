use anyhow::Result;
use clap::Parser;
use playerscope::args::Args;
use playerscope::config::Config;
use playerscope::driver;
use playerscope::error::InspectError;
use playerscope::logging::{self, LogConfig};
use playerscope::session::{self, Outcome};
use playerscope::wait;
use tokio_util::sync::CancellationToken;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(if args.verbose {
        LogConfig::debug()
    } else {
        LogConfig::from_env()
    });
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config);
    config.validated_target()?;

    if !args.json {
        println!("=== playerscope: video player inspector ===");
    }

    // Ctrl-C ends any wait or the hold-open pause; the browser still gets closed.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let driver = match wait::cancellable(&cancel, driver::launch(&config.browser)).await {
        Ok(driver) => driver,
        Err(e) => {
            report_error(e);
            return Ok(());
        }
    };

    let json = args.json;
    let result = session::run(driver, &config, &cancel, |outcome: &Outcome| {
        if !json {
            print!("{}", outcome);
            return;
        }
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!(error = %e, "Failed to serialize outcome"),
        }
    })
    .await;

    if let Err(e) = result {
        report_error(e);
    }
    Ok(())
}

/// Print a failed run: the message on stdout, the full cause chain on stderr.
fn report_error(err: InspectError) {
    println!("\nError: {}", err);
    eprintln!("{:?}", anyhow::Error::new(err));
}
