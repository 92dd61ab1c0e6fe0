//! Reverse proxy for `/api`.
//!
//! DESIGN
//! ======
//! Plain requests are replayed against `API_ORIGIN` with the same method,
//! path, query, headers, and body; the upstream response streams back as-is
//! so `Set-Cookie` and `x-csrf-token` reach the browser. The `Host` header is
//! rewritten to the backend and hop-by-hop headers are dropped both ways.
//!
//! Websocket upgrades connect to the backend first, then upgrade the browser
//! connection and pump frames in both directions until either side closes.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::Body;
use axum::extract::ws::{self, WebSocket, WebSocketUpgrade};
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::{StatusCode, request};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::state::AppState;

/// Largest request body buffered for forwarding.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Browser headers carried onto the upstream websocket handshake.
const WS_FORWARDED: [HeaderName; 3] = [header::COOKIE, header::AUTHORIZATION, header::USER_AGENT];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("reading request body: {0}")]
    Body(String),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream websocket failed: {0}")]
    WebSocket(#[from] tungstenite::Error),
    #[error("cannot derive websocket url from {0:?}")]
    WebSocketUrl(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "proxy failure");
        (StatusCode::BAD_GATEWAY, self.to_string()).into_response()
    }
}

// =============================================================================
// URLS AND HEADERS
// =============================================================================

pub(crate) fn upstream_url(origin: &str, path_and_query: &str) -> String {
    format!("{}{path_and_query}", origin.trim_end_matches('/'))
}

pub(crate) fn ws_upstream_url(origin: &str, path_and_query: &str) -> Result<String, ProxyError> {
    let url = upstream_url(origin, path_and_query);
    if let Some(rest) = url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}"));
    }
    if let Some(rest) = url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}"));
    }
    Err(ProxyError::WebSocketUrl(origin.to_owned()))
}

pub(crate) fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy `headers` without hop-by-hop entries, anything the `Connection`
/// header nominates, or `Host`.
pub(crate) fn forward_headers(headers: &HeaderMap) -> HeaderMap {
    let nominated: Vec<String> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .collect();

    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if name == header::HOST || is_hop_by_hop(name) || nominated.iter().any(|n| n == name.as_str()) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

pub(crate) fn is_websocket_upgrade(headers: &HeaderMap) -> bool {
    let upgrade = headers
        .get(header::UPGRADE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("websocket"));
    let connection = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(',').any(|token| token.trim().eq_ignore_ascii_case("upgrade")));
    upgrade && connection
}

// =============================================================================
// HANDLER
// =============================================================================

/// Forward one `/api` request to the backend.
///
/// # Errors
///
/// Returns a [`ProxyError`] (rendered as `502 Bad Gateway`) when the body
/// cannot be read or the backend is unreachable.
pub async fn forward(State(state): State<AppState>, request: Request) -> Result<Response, ProxyError> {
    let (mut parts, body) = request.into_parts();
    let path_and_query = parts.uri.path_and_query().map_or("/", |pq| pq.as_str()).to_owned();

    if state.config.proxy_ws && is_websocket_upgrade(&parts.headers) {
        return forward_websocket(&state, &mut parts, &path_and_query).await;
    }

    let url = upstream_url(&state.config.api_origin, &path_and_query);
    tracing::debug!(method = %parts.method, upstream = %url, "proxying request");

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| ProxyError::Body(e.to_string()))?;
    let mut headers = forward_headers(&parts.headers);
    if let Some(host) = parts.headers.get(header::HOST) {
        headers.insert(HeaderName::from_static("x-forwarded-host"), host.clone());
    }

    let upstream = state.http.request(parts.method, url).headers(headers).body(body).send().await?;

    let status = upstream.status();
    let headers = forward_headers(upstream.headers());
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

async fn forward_websocket(
    state: &AppState,
    parts: &mut request::Parts,
    path_and_query: &str,
) -> Result<Response, ProxyError> {
    let upgrade = match WebSocketUpgrade::from_request_parts(parts, state).await {
        Ok(upgrade) => upgrade,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let url = ws_upstream_url(&state.config.api_origin, path_and_query)?;
    let mut handshake = url.as_str().into_client_request()?;
    for name in WS_FORWARDED {
        if let Some(value) = parts.headers.get(&name) {
            handshake.headers_mut().insert(name, value.clone());
        }
    }

    let (upstream, _) = tokio_tungstenite::connect_async(handshake).await?;
    tracing::info!(upstream = %url, "websocket bridged");
    Ok(upgrade.on_upgrade(move |socket| bridge(socket, upstream)))
}

// =============================================================================
// WEBSOCKET BRIDGE
// =============================================================================

async fn bridge<S>(client: WebSocket, upstream: tokio_tungstenite::WebSocketStream<S>)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut client_tx, mut client_rx) = client.split();
    let (mut upstream_tx, mut upstream_rx) = upstream.split();

    let client_to_upstream = async {
        while let Some(Ok(msg)) = client_rx.next().await {
            let Some(msg) = to_upstream(msg) else { continue };
            let closing = matches!(msg, Message::Close(_));
            if upstream_tx.send(msg).await.is_err() || closing {
                break;
            }
        }
    };

    let upstream_to_client = async {
        while let Some(Ok(msg)) = upstream_rx.next().await {
            let Some(msg) = to_client(msg) else { continue };
            let closing = matches!(msg, ws::Message::Close(_));
            if client_tx.send(msg).await.is_err() || closing {
                break;
            }
        }
    };

    tokio::select! {
        () = client_to_upstream => {}
        () = upstream_to_client => {}
    }
    tracing::debug!("websocket bridge closed");
}

/// Pings and pongs are answered per hop and not relayed.
fn to_upstream(msg: ws::Message) -> Option<Message> {
    match msg {
        ws::Message::Text(text) => Some(Message::Text(text.as_str().to_owned().into())),
        ws::Message::Binary(data) => Some(Message::Binary(data)),
        ws::Message::Close(frame) => Some(Message::Close(frame.map(|f| CloseFrame {
            code: CloseCode::from(f.code),
            reason: f.reason.as_str().to_owned().into(),
        }))),
        ws::Message::Ping(_) | ws::Message::Pong(_) => None,
    }
}

fn to_client(msg: Message) -> Option<ws::Message> {
    match msg {
        Message::Text(text) => Some(ws::Message::Text(text.as_str().to_owned().into())),
        Message::Binary(data) => Some(ws::Message::Binary(data)),
        Message::Close(frame) => Some(ws::Message::Close(frame.map(|f| ws::CloseFrame {
            code: u16::from(f.code),
            reason: f.reason.as_str().to_owned().into(),
        }))),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}
