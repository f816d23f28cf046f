use std::path::Path;

use crate::server::{self, AppState};

pub fn run(config_path: &Path, port: Option<u16>, json_output: bool) -> i32 {
    let (mut config, store) = match super::open_store(config_path) {
        Ok(opened) => opened,
        Err(e) => return super::finish(Err(e), json_output),
    };
    if let Some(port) = port {
        config.server_port = port;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return 1;
        }
    };
    let port = config.server_port;
    let state = AppState::new(config, store);
    let result = runtime.block_on(async move {
        let listener = server::bind(port).await?;
        server::serve(listener, state).await
    });
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "server stopped");
            eprintln!("Error: {e:#}");
            1
        }
    }
}
