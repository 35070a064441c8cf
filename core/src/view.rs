//! Plain-text rendering of the store.
//!
//! The layout follows the single-page client: a title, the input form, and
//! either a loading indicator or the list with a delete affordance per item.

use std::fmt::Write;

use crate::store::TodoStore;

pub const TITLE: &str = "Todo List";
pub const LOADING: &str = "Loading...";
pub const EMPTY: &str = "(no todos)";

pub fn render(store: &TodoStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");

    let button = if store.is_loading() {
        "[Add Todo] (disabled)"
    } else {
        "[Add Todo]"
    };
    let _ = writeln!(out, "> {} {button}", store.draft());

    if store.is_loading() {
        let _ = writeln!(out, "{LOADING}");
        return out;
    }

    if store.items().is_empty() {
        let _ = writeln!(out, "{EMPTY}");
    }
    for (n, item) in store.items().iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {} [Delete]", n + 1, item.text);
    }
    out
}
