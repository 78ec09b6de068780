use std::fmt;
use std::sync::Arc;

use api::config::DEFAULT_API_URL;
use api::{ApiConfig, FirebaseConfig};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use ui::{App, UiApp, build_app_context};

const API_URL_ENV: &str = "ATHENO_API_URL";
const FIREBASE_KEY_ENV: &str = "ATHENO_FIREBASE_API_KEY";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyApiUrl,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyApiUrl => write!(f, "--api-url must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    offline: bool,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn offline(&self) -> bool {
        self.offline
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    api_url: String,
    firebase_key: Option<String>,
    offline: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--firebase-key <key>]");
    eprintln!("  cargo run -p app -- --offline");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_API_URL}");
    eprintln!();
    eprintln!("Environment (a .env file is read first):");
    eprintln!("  {API_URL_ENV}, {FIREBASE_KEY_ENV}, RUST_LOG");
}

impl Args {
    /// Flags win over the environment values passed in.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env_api_url: Option<String>,
        env_firebase_key: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut api_url = env_api_url
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut firebase_key = env_firebase_key.filter(|value| !value.trim().is_empty());
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::EmptyApiUrl);
                    }
                    api_url = value;
                }
                "--firebase-key" => {
                    firebase_key = Some(require_value(args, "--firebase-key")?);
                }
                "--offline" => offline = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            firebase_key,
            offline,
        })
    }
}

fn build_services(args: &Args, clock: Clock) -> Result<AppServices, Box<dyn std::error::Error>> {
    if args.offline {
        log::info!("starting offline with seeded demo content");
        return Ok(AppServices::offline(clock)?);
    }

    let api = ApiConfig::new(&args.api_url)?;
    let firebase = args
        .firebase_key
        .as_deref()
        .map(FirebaseConfig::new)
        .transpose()?;
    Ok(AppServices::online(api, firebase, clock))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(
        &mut argv,
        std::env::var(API_URL_ENV).ok(),
        std::env::var(FIREBASE_KEY_ENV).ok(),
    )
    .map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = build_services(&args, Clock::system())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        offline: args.offline,
    });
    let context = build_app_context(&app);

    // On macOS, tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Atheno")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
