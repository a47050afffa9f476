//! Composes preview documents from playground buffers.

mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::{
    compose, compose_to_html, ComposeInput, ComposedDocument, CompileOptions, StylesheetMode,
    DEFAULT_STYLESHEET_HREF, DEFAULT_TITLE,
};
