use crate::components::event_store::EventStoreActor;
use crate::components::next_live::{CountdownState, NextLive};
use crate::components::ComponentManager;
use crate::config::Config;
use crate::error::Error;
use crate::shutdown;
use crate::web::handlers::{health_handler, ics_handler, index_handler, watch_handler};
use crate::web::AppState;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{oneshot, watch, RwLock};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Initialize components and start the web server
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.site_locale);
        info!("Setting locale to {}", config_read.site_locale);
    }

    // Spawn the event store actor; it loads the event list once
    let (mut store_actor, store_handle) = EventStoreActor::new(Arc::clone(&config));
    tokio::spawn(async move {
        store_actor.run().await;
    });

    // Countdown state channel shared between the tracker and the pages
    let (countdown_tx, countdown_rx) = watch::channel(CountdownState::Idle);

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    {
        let config_read = config.read().await;
        if config_read.is_component_enabled("next_live") {
            component_manager.register(NextLive::new(countdown_tx));
        }
    }

    // Create a shared component manager
    let component_manager = Arc::new(component_manager);

    // Initialize components
    component_manager
        .init_all(Arc::clone(&config), store_handle.clone())
        .await?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Clone handles for the shutdown handler
    let shutdown_components = Arc::clone(&component_manager);
    let shutdown_store = store_handle.clone();

    // Spawn signal handler task
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components, shutdown_store).await;
    });

    // Build the router
    let state = AppState {
        config: Arc::clone(&config),
        store: store_handle,
        countdown: countdown_rx,
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/events/{id}/calendar.ics", get(ics_handler))
        .route("/watch/{id}", get(watch_handler))
        // Serve static files
        .nest_service("/assets", ServeDir::new("assets/schedule"))
        // Other middlewares
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Bind to address and run server
    let port = {
        let config_read = config.read().await;
        config_read.port
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;

    // Create a separate task to handle the server
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.map_err(Error::from)
    });

    // Wait for either the server to end or a shutdown signal
    tokio::select! {
        result = server_handle => {
            info!("Server process ended");
            match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e.into()),
                Err(e) => {
                    error!("Server task error: {:?}", e);
                    Err(Error::Other(format!("Server task error: {}", e)).into())
                }
            }
        }
        _ = shutdown_recv => {
            info!("Received shutdown signal, shutting down server...");
            Ok(())
        }
    }
}
