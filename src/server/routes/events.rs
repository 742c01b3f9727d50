//! Live event stream over WebSocket

use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use actix_ws::Message;
use tracing::{debug, info};

/// Configure the observer route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(event_stream));
}

/// Upgrade to a WebSocket and forward every published event as a text frame
///
/// The connection is independent of any batch: it sees whatever is
/// published while it is open.
pub async fn event_stream(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (response, mut session, mut messages) = actix_ws::handle(&req, body)?;

    let bus = state.bus.clone();
    let mut observer = bus.subscribe().await;
    let id = observer.id();
    info!(observer = id, "Event observer connected");

    actix_web::rt::spawn(async move {
        let reason = loop {
            tokio::select! {
                event = observer.recv() => match event {
                    Some(text) => {
                        if session.text(text.to_string()).await.is_err() {
                            break None;
                        }
                    }
                    None => {
                        debug!(observer = id, "Dropped by the event bus");
                        break None;
                    }
                },
                message = messages.recv() => match message {
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break None;
                        }
                    }
                    Some(Ok(Message::Close(reason))) => break reason,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(observer = id, "WebSocket protocol error: {}", e);
                        break None;
                    }
                    None => break None,
                },
            }
        };

        bus.unsubscribe(observer).await;
        let _ = session.close(reason).await;
        info!(observer = id, "Event observer disconnected");
    });

    Ok(response)
}
