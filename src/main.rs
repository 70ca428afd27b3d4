//! Text Insight Service: binary entrypoint.
//! Loads settings and lexicon tables, then serves the Axum router via Shuttle.

use shuttle_axum::ShuttleAxum;
use text_insight::{api, metrics::Metrics, AppState, Settings};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs; `RUST_LOG` wins over the configured filter.
/// A subscriber installed by the runtime takes precedence (try_init).
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env();
    init_tracing(&settings);

    let state = AppState::from_settings(&settings)?;
    let mut router = api::create_router(state, &settings.cors_origins);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => warn!(error = %e, "metrics disabled"),
    }

    info!(
        lexicon = %settings.lexicon_path.display(),
        cors = ?settings.cors_origins,
        "text insight service ready"
    );

    Ok(router.into())
}
