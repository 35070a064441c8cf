//! Optimistic client core for the todo service.
//!
//! # Overview
//! Keeps a local todo list in step with a remote HTTP service. Adds and
//! deletes are applied locally first and reconciled once the server answers.
//! The core never touches the network itself (host-does-IO pattern): it
//! builds `HttpRequest` values and consumes `HttpResponse` values.
//!
//! # Design
//! - `TodoClient` is stateless and only knows how to build requests and
//!   parse responses for list, create and delete.
//! - `TodoStore` owns the list, the loading flag and the table of in-flight
//!   requests, and decides how to roll back when one fails.
//! - `view::render` and `Debouncer` are front-end helpers that stay free of
//!   any terminal or runtime dependency.

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod http;
pub mod ids;
pub mod store;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use config::{ClientConfig, DeleteRecovery};
pub use debounce::Debouncer;
pub use error::NetworkError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use ids::IdGenerator;
pub use store::{Command, Completion, Notice, Ticket, TodoState, TodoStore};
pub use types::TodoItem;
