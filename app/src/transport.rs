//! Blocking HTTP execution with ureq.
//!
//! ureq's status-code-as-error behaviour is disabled so 4xx/5xx responses
//! come back as data; only failures that produced no response at all become
//! `NetworkError::Transport`. No timeouts are configured.

use todo_core::{HttpMethod, HttpRequest, HttpResponse, NetworkError};
use tracing::trace;

#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, NetworkError> {
        trace!(method = req.method.as_str(), path = %req.path, "sending request");

        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.path).call(),
            HttpMethod::Delete => self.agent.delete(&req.path).call(),
            HttpMethod::Post => {
                let mut post = self.agent.post(&req.path);
                for (key, value) in &req.headers {
                    post = post.header(key.as_str(), value.as_str());
                }
                match req.body {
                    Some(body) => post.send(body.as_bytes()),
                    None => post.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| NetworkError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        trace!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
