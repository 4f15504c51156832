//! Redis Basic - A thin cache wrapper over Redis
//!
//! Stores each command-line argument in the cache, reads it back with the
//! decoder matching its kind, and prints the recorded history of the store
//! operation.

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_basic::cache::{Cache, Replay, Value, STORE_QUALNAME};
use redis_basic::config::{Config, OutputFormat};

/// A stored value together with its key and what reading it back produced.
#[derive(Debug, Serialize)]
struct StoredItem {
    key: String,
    value: Value,
    read_back: String,
}

#[derive(Debug, Serialize)]
struct Report {
    items: Vec<StoredItem>,
    replay: Replay,
}

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Bind the cache (ping + flush)
/// 4. Store and read back every value
/// 5. Print the replay of `Cache.store`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_basic=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={}, redis_url={}",
        config.backend, config.redis_url
    );

    let cache = Cache::from_config(&config)
        .await
        .context("failed to initialize cache")?;

    let values = values_from_args(std::env::args().skip(1));
    let mut items = Vec::with_capacity(values.len());
    for value in values {
        let key = cache.store(value.clone()).await?;
        let read_back = read_back(&cache, &key, &value).await?;
        items.push(StoredItem {
            key,
            value,
            read_back,
        });
    }

    let replay = cache.replay(STORE_QUALNAME).await?;
    info!("Stored {} values", items.len());

    match config.output_format {
        OutputFormat::Text => {
            for item in &items {
                println!("{} -> {}", item.key, item.read_back);
            }
            println!("{replay}");
        }
        OutputFormat::Json => {
            let report = Report { items, replay };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Parses arguments into values, or returns one sample of each kind when
/// no arguments were given.
fn values_from_args(args: impl Iterator<Item = String>) -> Vec<Value> {
    let values: Vec<Value> = args.map(|arg| Value::parse_token(&arg)).collect();
    if !values.is_empty() {
        return values;
    }
    vec![
        Value::from("foo"),
        Value::from(b"bar".to_vec()),
        Value::from(123),
        Value::from(3.5),
    ]
}

/// Reads `key` back with the decoder that matches how `value` was stored.
async fn read_back(cache: &Cache, key: &str, value: &Value) -> anyhow::Result<String> {
    let rendered = match value {
        Value::Int(_) => cache.get_int(key).await?.map(|number| number.to_string()),
        Value::Str(_) => cache.get_str(key).await?,
        Value::Bytes(_) | Value::Float(_) => cache
            .get_with(key, |raw| String::from_utf8_lossy(&raw).into_owned())
            .await?,
    };
    rendered.with_context(|| format!("value under {key} disappeared"))
}
