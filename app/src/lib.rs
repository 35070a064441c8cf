//! Terminal front end for the todo service.
//!
//! `input` turns typed lines into actions, `transport` executes the core's
//! `HttpRequest` values over real HTTP. The event loop in `main.rs` ties
//! them to a `TodoStore`.

pub mod input;
pub mod transport;

pub use input::Input;
pub use transport::UreqTransport;
