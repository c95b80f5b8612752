//! HTTP surface of the wall backend
mod api;
mod middleware;

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Compress, Logger, NormalizePath, TrailingSlash},
    web::Data,
    App, HttpServer,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};
use wallman_core::{CatalogStore, ModerationDesk, SchedulingConfig};
use wallman_error::{init::InitContextError, WMError, WMResult};
use wallman_models::settings::Settings;

pub use api::configure_routes;
pub use middleware::RequestContext;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub desk: Arc<ModerationDesk>,
    pub scheduling: Arc<SchedulingConfig>,
    pub settings: Settings,
}

/// Owns the running HTTP server so it can be stopped gracefully
#[derive(Clone)]
pub struct WMWebServer {
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl WMWebServer {
    fn create_server(state: AppState) -> WMResult<Server> {
        let settings = state.settings.clone();
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let state = Data::new(state);

        let mut server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(NormalizePath::new(TrailingSlash::MergeOnly))
                .configure(configure_routes)
        });
        if settings.web.workers > 0 {
            server = server.workers(settings.web.workers);
        }

        server = server
            .bind(&addr)
            .map_err(|e| WMError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;
        info!(%addr, "web server listening");

        Ok(server.run())
    }

    #[instrument(name = "init-web-server", skip_all)]
    pub async fn init(state: AppState) -> WMResult<Arc<Self>, InitContextError> {
        let server = Self::create_server(state).map_err(|e| {
            InitContextError::Primitive(format!("Failed to create web server: {e}"))
        })?;
        let handle = server.handle();

        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error = %e, "Web server stopped with an error");
            }
        });

        Ok(Arc::new(WMWebServer {
            server: Arc::new(Mutex::new(Some(handle))),
        }))
    }

    #[instrument(name = "web-server-stop", skip_all)]
    pub async fn stop(&self) -> WMResult<()> {
        info!("Stopping web server...");
        if let Some(handle) = self.server.lock().await.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped");
        Ok(())
    }
}
