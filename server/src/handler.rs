use std::convert::Infallible;

use msgs::authority_msg::AuthorityMsg;
use warp::{http::StatusCode, Filter, Rejection, Reply};

use crate::{ws, Result, context::AuthorityContextRef};

/// `/ws` and `/api/ws` upgrade to an observer connection. `/api/health` and
/// `/api/snapshot` are plain HTTP.
pub fn routes(context_ref: AuthorityContextRef) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ws_route = warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_context(context_ref.clone()))
        .and_then(ws_handler);

    // API routes with /api prefix for proxy
    let api_routes = warp::path("api").and(
        warp::path("health").and(warp::path::end()).and_then(health_handler)
            .or(warp::path("snapshot").and(warp::path::end()).and(warp::get()).and(with_context(context_ref)).and_then(snapshot_handler))
            .or(ws_route.clone())
    );

    api_routes.or(ws_route)
        .with(warp::cors().allow_any_origin())
}

fn with_context(context_ref: AuthorityContextRef) -> impl Filter<Extract = (AuthorityContextRef,), Error = Infallible> + Clone {
    warp::any().map(move || context_ref.clone())
}

pub async fn ws_handler(ws: warp::ws::Ws, context_ref: AuthorityContextRef) -> Result<impl Reply> {
    Ok(ws.on_upgrade(move |socket| ws::observer_connection_process(socket, context_ref)))
}

pub async fn health_handler() -> Result<impl Reply> {
    Ok(StatusCode::OK)
}

/// One-shot read of the current state, same shape as a broadcast.
pub async fn snapshot_handler(context_ref: AuthorityContextRef) -> Result<impl Reply> {
    let snapshot = context_ref.read().await.snapshot();
    Ok(warp::reply::json(&AuthorityMsg::Snapshot(snapshot)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use msgs::observer_msg::ObserverMsg;
    use msgs::role::{Intent, Role};
    use tokio::sync::RwLock;

    use super::*;
    use crate::context::AuthorityContext;

    #[tokio::test]
    async fn snapshot_returns_current_state() {
        let context_ref = Arc::new(RwLock::new(AuthorityContext::new()));
        {
            let mut context = context_ref.write().await;
            context.accept("a", ObserverMsg::Position { x: 5, y: 8, floor: 1, role: Role::Civilian, intent: Intent::Evacuate });
            context.accept("a", ObserverMsg::ToggleHazard { x: 5, y: 3, floor: 1 });
        }
        let filter = routes(context_ref.clone());

        let res = warp::test::request().method("GET").path("/api/snapshot").reply(&filter).await;
        assert_eq!(res.status(), StatusCode::OK);
        let msg = AuthorityMsg::decode(std::str::from_utf8(res.body()).unwrap()).unwrap();
        assert_eq!(msg.into_snapshot(), context_ref.read().await.snapshot());
    }

    #[tokio::test]
    async fn health_and_unknown_paths() {
        let filter = routes(Arc::new(RwLock::new(AuthorityContext::new())));
        let res = warp::test::request().path("/api/health").reply(&filter).await;
        assert_eq!(res.status(), StatusCode::OK);
        let res = warp::test::request().path("/api/nothing").reply(&filter).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
