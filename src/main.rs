use std::sync::Arc;

use beacon::config::Config;
use beacon::http::request::Method;
use beacon::router::Router;
use beacon::server;

/// The tutorial echo service: `POST /echo` sends the request body straight
/// back; every other (method, path) pair falls through to 404.
fn echo_routes() -> Router {
    let mut router = Router::new();

    router.route(Method::POST, "/echo", |req, res| {
        res.write_body(&req.body)?;
        res.finish()?;
        Ok(())
    });

    router
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let router = Arc::new(echo_routes());

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
