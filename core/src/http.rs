//! Requests and responses exchanged between the store and its host.
//!
//! The store never performs I/O. It emits an `HttpRequest` per `Command`;
//! the terminal app runs it on tokio's blocking pool through ureq (tests run
//! it inline) and passes the resulting `HttpResponse`, or the transport
//! failure, back to `TodoStore::complete`.

/// The three verbs the todo API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// `path` is the absolute URL; `body` is JSON when present.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn success_is_the_2xx_range() {
        assert!(status(200).is_success());
        assert!(status(299).is_success());
        assert!(!status(199).is_success());
        assert!(!status(300).is_success());
        assert!(!status(404).is_success());
    }
}
