//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! The core never opens a socket. It describes the round-trips the screen
//! needs as plain `HttpRequest` values and interprets the `HttpResponse`
//! values the host brings back. Keeping the transport as data makes every
//! screen transition reproducible in a unit test, and the host (the terminal
//! front end, or a test harness) stays free to execute requests however and
//! whenever it likes — including overlapping ones.
//!
//! All fields are owned (`String`, `Vec`) so values can be moved onto worker
//! threads without lifetime concerns.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ProductClient::build_*` methods. The host executes it against
/// the network and hands the corresponding `HttpResponse` back.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed to
/// `ProductClient::parse_*` methods (usually via the screen's `apply_*`
/// operations) for interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
