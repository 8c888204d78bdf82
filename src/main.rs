//! authbridge CLI
//!
//! Runs the login pipeline against the configured target. Credentials come
//! from `AUTHBRIDGE_USERNAME` / `AUTHBRIDGE_PASSWORD`; non-secret values
//! can be overridden on the command line. The process exits normally
//! regardless of the verification outcome; failures are logged.

use authbridge::config::Settings;
use clap::Parser;

/// Browser-driven web login with cookie hand-off
#[derive(Parser, Debug)]
#[command(name = "authbridge")]
#[command(version)]
#[command(about = "Drive a browser login and bridge the session into an HTTP client")]
struct Args {
    /// Sign-in page URL (overrides AUTHBRIDGE_LOGIN_URL)
    #[arg(long)]
    url: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: bool,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Disable the Chromium sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// Per-element wait window in milliseconds
    #[arg(long)]
    element_timeout_ms: Option<u64>,

    /// Verification window for the post-login marker in milliseconds
    #[arg(long)]
    verify_timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("authbridge {} starting", authbridge::VERSION);

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return;
        }
    };

    if let Some(url) = args.url {
        settings.login_url = url;
    }
    if args.headless {
        settings.browser.headless = true;
    }
    if args.no_sandbox {
        settings.browser.sandbox = false;
    }
    if let Some(path) = args.chrome_path {
        settings.browser.chrome_path = Some(path);
    }
    if let Some(ms) = args.element_timeout_ms {
        settings.timing.element_timeout_ms = ms;
    }
    if let Some(ms) = args.verify_timeout_ms {
        settings.timing.verify_timeout_ms = ms;
    }

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration error: {}", e);
        return;
    }

    match authbridge::runner::run(&settings).await {
        Ok(outcome) if outcome.authenticated => {
            tracing::info!(
                "Login successful; {} cookies bridged into HTTP session",
                outcome.bridged_cookies
            );
        }
        Ok(_) => {
            tracing::warn!("Login verification failed: marker not found");
        }
        Err(e) => {
            tracing::error!("Login run failed: {}", e);
        }
    }
}
