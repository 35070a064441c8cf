//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each remote operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! No timeout, retry or backoff lives here: whatever the host reports is
//! handed straight to the caller.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::TodoItem;

/// Characters escaped when an id is placed into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The collection endpoint, `{base_url}/todos`.
    pub fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, item: &TodoItem) -> Result<HttpRequest, NetworkError> {
        let body = serde_json::to_string(item).map_err(|e| NetworkError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_remove(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!(
                "{}/{}",
                self.collection_url(),
                utf8_percent_encode(id, PATH_SEGMENT)
            ),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, NetworkError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| NetworkError::Decode(e.to_string()))
    }

    /// The body of a create response is ignored: the server is trusted to
    /// keep the client-supplied id.
    pub fn parse_create(&self, response: HttpResponse) -> Result<(), NetworkError> {
        check_status(&response)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), NetworkError> {
        check_status(&response)
    }
}

/// Any 2xx is success; everything else becomes `NetworkError::Status`.
fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_sends_client_id() {
        let item = TodoItem::new("42", "buy milk");
        let req = client().build_create(&item).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], "42");
        assert_eq!(body["text"], "buy milk");
    }

    #[test]
    fn build_remove_targets_item_path() {
        let req = client().build_remove("1700000000000");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/1700000000000");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_remove_escapes_path_characters() {
        let req = client().build_remove("a/b c");
        assert_eq!(req.path, "http://localhost:3000/todos/a%2Fb%20c");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        assert_eq!(client.build_list().path, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_keeps_server_order() {
        let resp = response(200, r#"[{"id":"2","text":"b"},{"id":"1","text":"a"}]"#);
        let items = client().parse_list(resp).unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list(response(200, "not json")).unwrap_err();
        assert!(matches!(err, NetworkError::Decode(_)));
    }

    #[test]
    fn parse_list_non_2xx() {
        let err = client().parse_list(response(503, "down")).unwrap_err();
        assert_eq!(
            err,
            NetworkError::Status {
                status: 503,
                body: "down".to_string()
            }
        );
    }

    #[test]
    fn parse_create_accepts_any_2xx() {
        assert!(client().parse_create(response(201, "{}")).is_ok());
        assert!(client().parse_create(response(200, "")).is_ok());
        assert!(client().parse_create(response(204, "")).is_ok());
    }

    #[test]
    fn parse_create_wrong_status() {
        let err = client().parse_create(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 500, .. }));
    }

    #[test]
    fn parse_remove_not_found_is_a_network_error() {
        let err = client().parse_remove(response(404, "")).unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 404, .. }));
    }
}
