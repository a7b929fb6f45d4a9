mod classifier;
mod config;
mod http_classifier;
mod types;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use axum_prometheus::PrometheusMetricLayer;
use clap::Parser;
use metrics::counter;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use classifier::Classifier;
use config::{Config, DownstreamConfig};
use http_classifier::HttpClassifier;
use types::{ClassifyPayload, TweetRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,tweet_relay=debug".into()),
    );
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!("Starting tweet relay with config: {:?}", config);

    let classifier = HttpClassifier::new(DownstreamConfig::from(&config))?;
    tracing::info!("Forwarding classification requests to {}", classifier.url());

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = router(AppState::new(Arc::new(classifier)))
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server_address()).await?;
    tracing::info!("Server running on http://{}", config.server_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[derive(Clone)]
struct AppState {
    classifier: Arc<dyn Classifier + Send + Sync>,
}

impl AppState {
    fn new(classifier: Arc<dyn Classifier + Send + Sync>) -> Self {
        Self { classifier }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/tweets/classify", post(classify_handler))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

#[tracing::instrument(
    skip(state, request),
    fields(relay_id = %uuid::Uuid::new_v4().simple(), tweet_count = request.tweets.len())
)]
async fn classify_handler(
    State(state): State<AppState>,
    Json(request): Json<TweetRequest>,
) -> Result<(StatusCode, String), StatusCode> {
    counter!("tweet_relay_requests_total").increment(1);
    tracing::info!("Relaying classification request");

    let reply = match state
        .classifier
        .classify(ClassifyPayload::from(request))
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            counter!("tweet_relay_downstream_failures_total").increment(1);
            tracing::error!(error = %e, "Downstream classification call failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    counter!(
        "tweet_relay_downstream_responses_total",
        "status" => reply.status.as_u16().to_string()
    )
    .increment(1);

    // Any 2xx is reported as 200; everything else keeps the downstream status.
    if reply.status.is_success() {
        tracing::info!(status = %reply.status, "Classification relayed");
        Ok((StatusCode::OK, reply.body))
    } else {
        tracing::warn!(status = %reply.status, "Downstream returned an error status");
        Ok((reply.status, reply.body))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }
}
