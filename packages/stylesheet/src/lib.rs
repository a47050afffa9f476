//! # Playground Stylesheet
//!
//! Rule-level stylesheet parsing for the preview pipeline.
//!
//! ```text
//! stylesheet text → lexer (logos) → parser → Stylesheet (rule tree) → serializer → text
//! ```
//!
//! The tree only distinguishes what selector scoping needs: style rules
//! (selector + opaque declarations), grouping at-rules (children), other
//! at-rules and unknown fragments. The round trip is lossless.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::{Block, RuleKind, StyleRule, Stylesheet};
pub use lexer::{lex, SpannedToken, Token};
pub use parser::{parse, Parser};
pub use serializer::serialize;
