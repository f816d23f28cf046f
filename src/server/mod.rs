//! HTTP API: axum router over the configured store.

pub mod auth;
pub mod handlers;
pub mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::db::Table;
use crate::models::{CalendarEvent, Member, Project, Task};
use crate::session::SessionStore;
use crate::store::Store;

pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub sessions: SessionStore,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> SharedState {
        Arc::new(Self {
            config,
            store,
            sessions: SessionStore::new(),
        })
    }
}

fn resource_routes<R: Table>(router: Router<SharedState>) -> Router<SharedState> {
    let collection = format!("/{}", R::COLLECTION);
    let member = format!("/{}/:id", R::COLLECTION);
    router
        .route(&collection, get(handlers::list::<R>).post(handlers::create::<R>))
        .route(
            &member,
            get(handlers::show::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::remove::<R>),
        )
}

pub fn router(state: SharedState) -> Router {
    let mut protected = Router::new()
        .route("/user", get(handlers::current_user))
        .route("/dashboard", get(handlers::dashboard));
    protected = resource_routes::<Task>(protected);
    protected = resource_routes::<Project>(protected);
    protected = resource_routes::<CalendarEvent>(protected);
    protected = resource_routes::<Member>(protected);
    let protected =
        protected.route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    let api = Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .merge(protected);

    let base = state.config.base_path();
    let app = Router::new().route("/", get(handlers::index));
    let app = if base.is_empty() {
        app.merge(api)
    } else {
        app.nest(base, api)
    };
    app.fallback(handlers::not_found).with_state(state)
}

/// Serve on an already-bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, state: SharedState) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!(%addr, mode = state.store.mode(), base = state.config.base_path(), "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("server stopped");
    Ok(())
}

pub async fn bind(port: u16) -> anyhow::Result<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
    }
}
