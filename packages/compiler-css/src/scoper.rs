//! Selector scoping
//!
//! Rewrites the selectors of a rule tree so every style rule only matches
//! inside the preview container. The transform takes the tree by value,
//! rewrites selectors in place and hands the tree back.

use crate::selector::{is_ident_char, ScopeSelector};
use playground_stylesheet::{parse, StyleRule, Stylesheet};
use tracing::{debug, instrument};

/// Scope a list of rules. Grouping rules are descended into.
pub fn scope_rules(mut rules: Vec<StyleRule>, scope: &ScopeSelector) -> Vec<StyleRule> {
    for rule in &mut rules {
        scope_rule(rule, scope);
    }
    rules
}

/// Scope every rule of a parsed stylesheet
#[instrument(skip_all, fields(scope = %scope))]
pub fn scope_stylesheet(mut sheet: Stylesheet, scope: &ScopeSelector) -> Stylesheet {
    let rules = std::mem::take(&mut sheet.rules);
    sheet.rules = scope_rules(rules, scope);
    debug!(rules = sheet.rule_count(), "Scoped stylesheet");
    sheet
}

/// Parse, scope and serialize stylesheet text
pub fn scope_css(source: &str, scope: &ScopeSelector) -> String {
    scope_stylesheet(parse(source), scope).to_css()
}

fn scope_rule(rule: &mut StyleRule, scope: &ScopeSelector) {
    for child in &mut rule.child_rules {
        scope_rule(child, scope);
    }

    let Some(selector) = rule.selector_text.as_deref() else {
        return;
    };

    if should_scope(selector, scope) {
        let scoped = prefix_selector_list(selector, scope);
        debug!(selector = %selector, scoped = %scoped, "Scoping rule");
        rule.selector_text = Some(scoped);
    } else {
        debug!(selector = %selector, "Leaving selector unscoped");
    }
}

/// Whether a rule with this selector gets prefixed. Decided for the whole
/// selector list at once.
pub fn should_scope(selector: &str, scope: &ScopeSelector) -> bool {
    let selector = selector.trim();

    !(has_no_alternatives(selector)
        || has_id_component(selector)
        || selector.eq_ignore_ascii_case(":root")
        || is_scoped(selector, scope))
}

/// Prefix each top-level alternative with the scope selector. Empty
/// alternatives are dropped.
pub fn prefix_selector_list(selector: &str, scope: &ScopeSelector) -> String {
    split_top_level(selector, ',')
        .into_iter()
        .map(str::trim)
        .filter(|alternative| !alternative.is_empty())
        .map(|alternative| format!("{} {}", scope, alternative))
        .collect::<Vec<_>>()
        .join(", ")
}

fn has_no_alternatives(selector: &str) -> bool {
    split_top_level(selector, ',')
        .iter()
        .all(|alternative| alternative.trim().is_empty())
}

/// The selector starts with the scope selector, followed by a boundary
/// (so `.preview-card` does not count as scoped by `.preview`)
fn is_scoped(selector: &str, scope: &ScopeSelector) -> bool {
    match selector.strip_prefix(scope.as_str()) {
        Some(rest) => !rest.starts_with(is_ident_char),
        None => false,
    }
}

/// `#` outside of strings and attribute brackets
fn has_id_component(selector: &str) -> bool {
    let mut scanner = Scanner::default();
    let mut chars = selector.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if c == '#' && !scanner.in_string() && scanner.brackets == 0 {
            return true;
        }
        scanner.advance(c);
    }

    false
}

/// Split on `separator` outside of parentheses, brackets and strings
fn split_top_level(selector: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut scanner = Scanner::default();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in selector.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == separator && !scanner.in_string() && scanner.depth() == 0 {
            parts.push(&selector[start..i]);
            start = i + c.len_utf8();
            continue;
        }
        scanner.advance(c);
    }
    parts.push(&selector[start..]);

    parts
}

/// Tracks nesting while walking selector text
#[derive(Default)]
struct Scanner {
    quote: Option<char>,
    parens: usize,
    brackets: usize,
}

impl Scanner {
    fn in_string(&self) -> bool {
        self.quote.is_some()
    }

    fn depth(&self) -> usize {
        self.parens + self.brackets
    }

    fn advance(&mut self, c: char) {
        match (self.quote, c) {
            (Some(q), c) if c == q => self.quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => self.quote = Some(c),
            (None, '(') => self.parens += 1,
            (None, ')') => self.parens = self.parens.saturating_sub(1),
            (None, '[') => self.brackets += 1,
            (None, ']') => self.brackets = self.brackets.saturating_sub(1),
            _ => {}
        }
    }
}
