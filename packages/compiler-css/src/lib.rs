//! Stylesheet scoping for the live preview.
//!
//! Author CSS is rewritten so that it only matches inside the preview
//! container and never leaks onto the page hosting the playground.

pub mod scoper;
pub mod selector;

pub use scoper::{prefix_selector_list, scope_css, scope_rules, scope_stylesheet, should_scope};
pub use selector::{Container, ScopeError, ScopeResult, ScopeSelector, DEFAULT_SCOPE_CLASS};
