use std::{collections::HashMap, sync::Arc};

use evac_core::EvacState;
use log::{debug, error, info};
use msgs::{authority_msg::{AuthorityMsg, Snapshot}, observer_msg::ObserverMsg};
use tokio::sync::{RwLock, mpsc};
use warp::filters::ws::Message;

use crate::connection_state::ConnectionState;

/// Where snapshots for one observer go.
pub enum ObserverLink {
    Remote(mpsc::UnboundedSender<std::result::Result<Message, warp::Error>>),
    Local(mpsc::UnboundedSender<AuthorityMsg>),
}

pub struct Observer {
    pub link: ObserverLink,
    pub state: ConnectionState,
}

impl Observer {
    fn send(&self, msg: &AuthorityMsg, json: &str) {
        // A failed send means the connection task is already shutting down and will disconnect.
        match &self.link {
            ObserverLink::Remote(sender) => {
                let _ = sender.send(Ok(Message::text(json)));
            }
            ObserverLink::Local(sender) => {
                let _ = sender.send(msg.clone());
            }
        }
    }
}

/// The authority's registries plus everyone watching them.
/// Only ever mutated behind the write lock of [`AuthorityContextRef`], and every
/// mutation broadcasts before the lock is released.
pub struct AuthorityContext {
    pub state: EvacState,
    pub observers: HashMap<String, Observer>,
    pub generation: usize,
}

pub type AuthorityContextRef = Arc<RwLock<AuthorityContext>>;

impl AuthorityContext {
    pub fn new() -> AuthorityContext {
        AuthorityContext {
            state: EvacState::new(),
            observers: HashMap::new(),
            generation: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Sends the welcome snapshot and starts including the observer in broadcasts.
    pub fn register(&mut self, id: String, link: ObserverLink) {
        let mut observer = Observer { link, state: ConnectionState::Connecting };
        let welcome = AuthorityMsg::Welcome { identity: id.clone(), snapshot: self.snapshot() };
        match welcome.encode() {
            Ok(json) => observer.send(&welcome, &json),
            Err(e) => error!("could not encode welcome for {id}: {e}"),
        }
        observer.state = ConnectionState::Active;
        info!("{id} {:?}, {} observers", observer.state, self.observers.len() + 1);
        self.observers.insert(id, observer);
    }

    /// Applies one mutation and pushes the resulting snapshot to every active observer.
    pub fn accept(&mut self, sender: &str, msg: ObserverMsg) {
        debug!("accepted from {sender}: {msg:?}");
        self.state.apply(sender, msg);
        self.broadcast();
    }

    /// Drops the observer and its occupant, then tells everyone else.
    pub fn disconnect(&mut self, id: &str) {
        if let Some(mut observer) = self.observers.remove(id) {
            observer.state = ConnectionState::Closed;
            info!("{id} {:?}, {} observers", observer.state, self.observers.len());
        }
        if self.state.occupants.remove(id).is_some() {
            debug!("removed occupant {id}");
        }
        self.broadcast();
    }

    pub fn broadcast(&mut self) {
        self.generation += 1;
        let msg = AuthorityMsg::Snapshot(self.snapshot());
        let json = match msg.encode() {
            Ok(json) => json,
            Err(e) => {
                error!("could not encode snapshot {}: {e}", self.generation);
                return;
            }
        };

        let active = self.observers.values().filter(|o| o.state == ConnectionState::Active);
        let mut count = 0;
        for observer in active {
            observer.send(&msg, &json);
            count += 1;
        }
        debug!(
            "snapshot {} to {count} observers: {} occupants, {} hazards",
            self.generation,
            self.state.occupants.len(),
            self.state.hazards.len()
        );
    }
}
