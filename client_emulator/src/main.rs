use anyhow::Context;
use console_cmd::ConsoleCmd;
use console_input::console_input_thread;
use evac_core::{FloorPlans, ObserverView};
use futures::{SinkExt, StreamExt};
use log::{info, warn};
use msgs::authority_msg::AuthorityMsg;
use tokio_tungstenite::tungstenite::Message;

mod console_cmd;
mod console_input;

const DEFAULT_URL: &str = "ws://127.0.0.1:9080/ws";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EVAC_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let plans = match std::env::var("EVAC_FLOOR_PLANS") {
        Ok(dir) => FloorPlans::load_dir(&dir).with_context(|| format!("loading floor plans from {dir}"))?,
        Err(_) => FloorPlans::builtin(),
    };

    let (ws, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .with_context(|| format!("could not connect to {url}"))?;
    info!("connected to {url}");

    let (mut ws_sender, mut ws_rcv) = ws.split();
    let mut view = ObserverView::new(plans);
    let mut console_receiver = console_input_thread();

    loop {
        tokio::select! {
            result = ws_rcv.next() => {
                let Some(result) = result else {
                    info!("authority closed the connection");
                    break;
                };
                match result.context("error while receiving")? {
                    Message::Text(text) => match AuthorityMsg::decode(&text) {
                        Ok(msg) => {
                            view.adopt(&msg);
                            print_own_route(&view);
                        }
                        Err(e) => warn!("could not decode authority msg: {e}"),
                    },
                    Message::Close(_) => {
                        info!("authority closed the connection");
                        break;
                    }
                    _ => {}
                }
            }
            input = console_receiver.recv() => {
                let Some(input) = input else { break };
                match ConsoleCmd::parse(input.trim()) {
                    Ok(ConsoleCmd::Send(msg)) => ws_sender.send(Message::text(msg.encode()?)).await?,
                    Ok(ConsoleCmd::Routes) => print_routes(&view),
                    Ok(ConsoleCmd::Status) => {
                        let state = view.state();
                        println!("{} occupants, {} hazards", state.occupants.len(), state.hazards.len());
                    }
                    Ok(ConsoleCmd::Quit) => {
                        ws_sender.close().await?;
                        break;
                    }
                    Err(err) => println!("err: {err}"),
                }
            }
        }
    }

    Ok(())
}

fn print_own_route(view: &ObserverView) {
    let Some(id) = view.identity() else { return };
    match view.own_route() {
        Some(route) if route.is_empty() => println!("{id}: no way out"),
        Some(route) => println!("{id}: {} steps to {:?}, cost {}", route.len() - 1, route.goal(), route.cost),
        None => {}
    }
}

fn print_routes(view: &ObserverView) {
    for (id, route) in view.routes() {
        let cells: Vec<String> = route.cells.iter().map(|c| c.to_string()).collect();
        println!("{id}: cost {} [{}]", route.cost, cells.join(" "));
    }
}
