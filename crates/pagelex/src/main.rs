use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use lexlookup::{FreeDictionary, LibreTranslate, WordLookup};
use pagelex::{AppState, SessionStore, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
const DEFAULT_MAX_SESSIONS: usize = 64;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!("dictionary at {}", config.dictionary_url);
    info!(
        "translation at {} (target language: {})",
        config.translate_url, config.target_lang
    );
    info!(
        "provider timeout {}s; sessions: ttl {}s, at most {}; uploads capped at {} bytes",
        config.provider_timeout.as_secs(),
        config.session_ttl.as_secs(),
        config.max_sessions,
        config.max_upload_bytes
    );
    if config.disable_cache {
        info!("cache headers disabled");
    }

    let client = reqwest::Client::builder()
        .timeout(config.provider_timeout)
        .build()?;
    let dictionary = FreeDictionary::new(client.clone(), config.dictionary_url.clone());
    let translator = LibreTranslate::new(
        client,
        config.translate_url.clone(),
        config.translate_api_key.clone(),
    );
    let lookup = WordLookup::new(
        Arc::new(dictionary),
        Arc::new(translator),
        config.target_lang.clone(),
    );

    let state = AppState {
        sessions: Arc::new(SessionStore::new(config.session_ttl, config.max_sessions)),
        lookup: Arc::new(lookup),
        max_upload_bytes: config.max_upload_bytes,
        disable_cache: config.disable_cache,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid listen address");
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    dictionary_url: String,
    translate_url: String,
    translate_api_key: Option<String>,
    target_lang: String,
    provider_timeout: Duration,
    session_ttl: Duration,
    max_sessions: usize,
    max_upload_bytes: usize,
    disable_cache: bool,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_target_lang: Option<String> = None;
    let mut cli_dictionary_url: Option<String> = None;
    let mut cli_translate_url: Option<String> = None;
    let mut args = env::args().skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--target-lang" => {
                if let Some(lang) = args.next() {
                    cli_target_lang = Some(lang);
                }
            }
            _ => {
                if let Some(lang) = arg.strip_prefix("--target-lang=") {
                    cli_target_lang = Some(lang.to_string());
                } else if let Some(url) = arg.strip_prefix("--dictionary-url=") {
                    cli_dictionary_url = Some(url.to_string());
                } else if let Some(url) = arg.strip_prefix("--translate-url=") {
                    cli_translate_url = Some(url.to_string());
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let dictionary_url = cli_dictionary_url
        .or_else(|| env::var("DICTIONARY_URL").ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| lexlookup::DEFAULT_DICTIONARY_URL.to_string());
    let translate_url = cli_translate_url
        .or_else(|| env::var("TRANSLATE_URL").ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| lexlookup::DEFAULT_TRANSLATE_URL.to_string());
    let translate_api_key = env::var("TRANSLATE_API_KEY")
        .ok()
        .filter(|key| !key.is_empty());
    let target_lang = cli_target_lang
        .or_else(|| env::var("TARGET_LANG").ok())
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| lexlookup::DEFAULT_TARGET_LANG.to_string());
    let provider_timeout_secs = env::var("PROVIDER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS);
    let session_ttl_secs = env::var("SESSION_TTL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECS);
    let max_sessions = env::var("MAX_SESSIONS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_SESSIONS);
    let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    Config {
        host,
        port,
        dictionary_url,
        translate_url,
        translate_api_key,
        target_lang,
        provider_timeout: Duration::from_secs(provider_timeout_secs),
        session_ttl: Duration::from_secs(session_ttl_secs),
        max_sessions,
        max_upload_bytes,
        disable_cache,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
