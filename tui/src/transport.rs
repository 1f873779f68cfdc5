//! HTTP execution for the screen's pending requests.
//!
//! The core never touches the network; this module is the host side of
//! that contract. Each request runs on its own thread and reports back
//! through a channel, so the UI loop never blocks on the wire. Nothing
//! here cancels or coalesces requests: submitting twice sends twice,
//! exactly as the screen allows.

use std::sync::mpsc::Sender;

use amma_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Operation, PendingRequest};

/// Outcome of one executed request, tagged for routing back into the screen.
pub struct NetEvent {
    pub operation: Operation,
    pub response: Result<HttpResponse, ApiError>,
}

/// Execute `pending` on a background thread, delivering the outcome on `tx`.
/// A closed receiver means the UI is gone; the result is dropped.
pub fn spawn(tx: Sender<NetEvent>, pending: PendingRequest) {
    std::thread::spawn(move || {
        let response = execute(pending.request);
        let _ = tx.send(NetEvent {
            operation: pending.operation,
            response,
        });
    });
}

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation. Only transport-level failures
/// become `ApiError::RequestFailed`.
pub fn execute(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    tracing::debug!(method = %request.method, path = %request.path, "dispatch");
    let result = match (request.method, request.body) {
        (HttpMethod::Get, _) => agent.get(&request.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&request.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&request.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&request.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&request.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&request.path).send_empty(),
    };

    let mut response = result.map_err(|e| ApiError::RequestFailed(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
    tracing::debug!(status, "complete");

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
