use anyhow::Context;
use futures::{FutureExt, StreamExt};
use log::{debug, info, warn};
use msgs::observer_msg::ObserverMsg;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;
use warp::ws::{Message, WebSocket};

use crate::context::{AuthorityContextRef, ObserverLink};

pub async fn observer_connection_process(ws: WebSocket, context_ref: AuthorityContextRef) {
    let (observer_ws_sender, mut observer_ws_rcv) = ws.split();
    let (to_observer_connection_process, observer_connection_process_rcv) = mpsc::unbounded_channel();

    let observer_rcv_stream = UnboundedReceiverStream::new(observer_connection_process_rcv);
    tokio::task::spawn(observer_rcv_stream.forward(observer_ws_sender).map(|result| {
        if let Err(e) = result {
            warn!("error sending websocket msg: {}", e);
        }
    }));

    let id = Uuid::new_v4().as_simple().to_string();
    info!("{} connecting", id);

    context_ref.write().await.register(id.clone(), ObserverLink::Remote(to_observer_connection_process));

    while let Some(result) = observer_ws_rcv.next().await {
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                warn!("error receiving ws message for id: {}: {}", id, e);
                break;
            }
        };
        if msg.is_close() {
            break;
        }
        if let Err(e) = observer_msg(&id, msg, &context_ref).await {
            warn!("dropping message from {}: {e}", id);
        }
    }

    context_ref.write().await.disconnect(&id);
}

async fn observer_msg(id: &str, msg: Message, context_ref: &AuthorityContextRef) -> anyhow::Result<()> {
    if msg.is_ping() || msg.is_pong() {
        return Ok(());
    }
    debug!("received message from {}: {:?}", id, msg);
    let text = msg.to_str().ok().context("not a text message")?;
    let observer_msg = ObserverMsg::decode(text)?;

    context_ref.write().await.accept(id, observer_msg);

    Ok(())
}
