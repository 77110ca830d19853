use std::sync::Arc;

use config::Config;
use console_input::console_input_thread;
use context::AuthorityContext;
use discoverable_service::register_msdn;
use display::spawn_display;
use log::{error, info, warn};
use tokio::sync::RwLock;
use warp::reject::Rejection;

mod config;
mod connection_state;
mod console_input;
mod context;
mod display;
mod handler;
mod ws;

type Result<T> = std::result::Result<T, Rejection>;

const SERVICE_NAME: &str = "evac-authority";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let plans = config.load_floor_plans()?;

    let context_ref = Arc::new(RwLock::new(AuthorityContext::new()));
    let display_ref = spawn_display(plans, &context_ref).await;

    console_input_thread(context_ref.clone(), display_ref);

    let routes = handler::routes(context_ref.clone());

    info!("starting evacuation authority");
    info!("   Local:   ws://127.0.0.1:{}/ws", config.port);

    let _mdns = match local_ip_address::local_ip() {
        Ok(local_ip) => {
            info!("   Network: ws://{}:{}/ws", local_ip, config.port);
            if config.announce {
                match register_msdn(local_ip, config.port, SERVICE_NAME) {
                    Ok(mdns) => {
                        info!("   Announced via mDNS as _{SERVICE_NAME}._tcp.local.");
                        Some(mdns)
                    }
                    Err(e) => {
                        warn!("mDNS announcement failed: {e}");
                        None
                    }
                }
            } else {
                None
            }
        }
        Err(e) => {
            warn!("could not determine local ip: {e}");
            None
        }
    };

    // Check if port is available before starting server
    if let Err(e) = std::net::TcpListener::bind(("0.0.0.0", config.port)) {
        error!("failed to bind to port {}: {}", config.port, e);
        error!("another authority or process is probably using it (lsof -i :{})", config.port);
        std::process::exit(1);
    }

    warp::serve(routes)
        .run(([0, 0, 0, 0], config.port))
        .await;

    Ok(())
}
