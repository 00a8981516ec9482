//! # fxdesk Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize tracing (and OTLP export when configured)
//! - Initialize the store adapter and the rate feed
//! - Create the service and start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::{PeriodicReader, SdkMeterProvider, exporter::PushMetricExporter},
    propagation::TraceContextPropagator,
    trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fxdesk_hex::{FxService, inbound};
use fxdesk_repo::build_repo;
use fxdesk_types::RateFeed;
use rate_feed::{FrankfurterFeed, StaticFeed};

use config::{Config, FeedKind};

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fxdesk-service"), provider))
}

/// Installs the global meter provider read by the HTTP metrics layer.
fn init_meter(endpoint: &str) -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    Ok(install_meter_provider(exporter))
}

fn install_meter_provider<E: PushMetricExporter>(exporter: E) -> SdkMeterProvider {
    let provider = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(exporter).build())
        .build();

    global::set_meter_provider(provider.clone());
    provider
}

fn build_feed(config: &Config) -> anyhow::Result<Arc<dyn RateFeed>> {
    Ok(match config.rate_feed {
        FeedKind::Frankfurter => Arc::new(FrankfurterFeed::new(config.frankfurter_url.as_str())?),
        FeedKind::Static => Arc::new(StaticFeed::new().with_daily_drift(0.5)),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let otel = config.otlp_endpoint.as_deref().map(init_tracer).transpose()?;
    let meter_provider = config.otlp_endpoint.as_deref().map(init_meter).transpose()?;
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));
    let json_fmt = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json());
    let plain_fmt = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fxdesk_app=debug,fxdesk_hex=debug".into()),
        )
        .with(json_fmt)
        .with(plain_fmt)
        .with(telemetry)
        .init();

    tracing::info!("Starting fxdesk server on port {}", config.port);
    tracing::info!(feed = ?config.rate_feed, "Using rate feed");

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    tracing::info!(backend = repo.backend(), "Store ready");

    let service = FxService::new(repo, build_feed(&config)?);

    // HTTP metrics layer (uses globally set MeterProvider)
    let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();
    let router = inbound::HttpServer::with_rate_limit(service, config.rate_limit_per_minute)
        .router()
        .layer(metrics);

    let addr = format!("0.0.0.0:{}", config.port);
    inbound::serve(router, &addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    if let Some(provider) = meter_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
