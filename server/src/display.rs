use std::sync::Arc;

use evac_core::{FloorPlans, ObserverView};
use log::debug;
use tokio::sync::{RwLock, mpsc};

use crate::context::{AuthorityContextRef, ObserverLink};

/// Identity under which the authority watches its own broadcasts.
pub const DISPLAY_ID: &str = "authority-display";

pub type DisplayRef = Arc<RwLock<ObserverView>>;

/// Registers the authority's own display as an observer and keeps its routes
/// up to date with every snapshot, exactly like a remote observer would.
pub async fn spawn_display(plans: FloorPlans, context_ref: &AuthorityContextRef) -> DisplayRef {
    let display_ref = Arc::new(RwLock::new(ObserverView::new(plans)));
    let (to_display, mut display_rcv) = mpsc::unbounded_channel();

    context_ref.write().await.register(DISPLAY_ID.to_string(), ObserverLink::Local(to_display));

    let display = display_ref.clone();
    tokio::spawn(async move {
        while let Some(msg) = display_rcv.recv().await {
            let mut view = display.write().await;
            view.adopt(&msg);
            for (id, route) in view.routes() {
                debug!("display: {id} -> {:?} ({} cells, cost {})", route.goal(), route.len(), route.cost);
            }
        }
    });

    display_ref
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use msgs::observer_msg::ObserverMsg;
    use msgs::role::{Intent, Role};

    use super::*;
    use crate::context::AuthorityContext;

    #[tokio::test]
    async fn display_follows_broadcasts() {
        let context_ref = Arc::new(RwLock::new(AuthorityContext::new()));
        let display = spawn_display(FloorPlans::builtin(), &context_ref).await;

        let msg = ObserverMsg::Position { x: 5, y: 5, floor: 1, role: Role::Civilian, intent: Intent::Evacuate };
        context_ref.write().await.accept("a", msg);

        for _ in 0..100 {
            if display.read().await.route("a").is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let view = display.read().await;
        assert_eq!(view.identity(), Some(DISPLAY_ID));
        assert_eq!(view.route("a").unwrap().cost, 5);
    }
}
