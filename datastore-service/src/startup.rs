use crate::config::{DatastoreConfig, StorageBackend};
use crate::handlers;
use crate::services::{BlobStore, LocalBlobStore, MongoDb, S3BlobStore};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Capabilities injected into every handler: the document store client and
/// the blob sink, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: DatastoreConfig,
    pub db: MongoDb,
    pub blobs: Arc<dyn BlobStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: DatastoreConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database).await?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let blobs = build_blob_store(&config).await?;

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            blobs,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route("/files", post(handlers::upload_file))
            .route(
                "/documents",
                get(handlers::list_documents).post(handlers::create_document),
            )
            .route("/documents/filter", get(handlers::filter_documents))
            .layer(middleware::from_fn(metrics_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or("-");

                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                }),
            )
            // request_id runs outermost so the span above can see the header
            .layer(middleware::from_fn(request_id_middleware))
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &MongoDb {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn build_blob_store(config: &DatastoreConfig) -> Result<Arc<dyn BlobStore>, AppError> {
    match config.storage.backend {
        StorageBackend::Local => {
            let store = LocalBlobStore::new(config.storage.local_path.clone())
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize local blob storage at {}: {}",
                        config.storage.local_path,
                        e
                    );
                    e
                })?;
            Ok(Arc::new(store))
        }
        StorageBackend::S3 => {
            let bucket = config.storage.s3_bucket.clone().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "STORAGE_S3_BUCKET is required when the storage backend is s3"
                ))
            })?;

            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = config.storage.s3_region.clone() {
                loader = loader.region(aws_config::Region::new(region));
            }
            let sdk_config = loader.load().await;

            Ok(Arc::new(S3BlobStore::new(
                aws_sdk_s3::Client::new(&sdk_config),
                bucket,
            )))
        }
    }
}
