use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Combine domain routes with the cross-cutting layers.
///
/// - OpenAPI UIs: `/swagger-ui`, `/redoc`, `/rapidoc`, `/scalar`
/// - `apis` nested under `/api`
/// - JSON 404 fallback
/// - request tracing, security headers, CORS (`CORS_ALLOWED_ORIGIN`, required), compression
///
/// Health endpoints are merged by the app, see [`health_router`](super::health_router).
pub async fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = cors_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve until SIGINT/SIGTERM, drain in-flight requests for at most
/// `server_config.shutdown_timeout`, then run `cleanup` under the same bound.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let timeout = server_config.shutdown_timeout;
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_watch = coordinator.clone();
    tokio::spawn(async move { signal_watch.wait_for_signal().await });

    let drain = coordinator.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { drain.cancelled().await })
        .into_future();

    let serve_result = tokio::select! {
        result = server => result.inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e)),
        _ = async {
            coordinator.cancelled().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!(?timeout, "In-flight requests did not drain in time, forcing shutdown");
            Ok(())
        }
    };

    info!(?timeout, "Running cleanup tasks");
    match tokio::time::timeout(timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(?timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(paths())]
    struct EmptyDoc;

    #[test]
    fn test_router_nests_api_and_falls_back() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000"), || {
            rt.block_on(async {
                let apis = Router::new().route("/ping", get(|| async { "pong" }));
                let router = create_router::<EmptyDoc>(apis).await.unwrap();

                let ok = router
                    .clone()
                    .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                assert_eq!(ok.status(), StatusCode::OK);

                let missing = router
                    .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                assert_eq!(missing.status(), StatusCode::NOT_FOUND);
            })
        });
    }
}
