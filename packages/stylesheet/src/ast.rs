//! Rule tree for a parsed stylesheet
//!
//! The tree is lossless: every byte of the source lands in exactly one
//! field, so an unmodified tree serializes back to the original text.

/// What a rule node is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Plain style rule: selector plus an opaque declaration block
    Style,

    /// Conditional or grouping at-rule whose block holds more rules
    /// (`@media`, `@supports`, ...). `name` is lowercase, without the `@`.
    Group { name: String },

    /// Any other at-rule. Its block, if any, is kept verbatim.
    AtRule { name: String },

    /// A fragment that is not a recognizable rule. Passed through as-is.
    Unknown,
}

/// What follows the rule header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `{ ... }` kept verbatim (declarations, keyframe lists, ...)
    Raw { contents: String, closed: bool },

    /// `{ ... }` whose contents are the node's `child_rules`.
    /// `trailing` is the whitespace and comments before the closing brace.
    Rules { trailing: String, closed: bool },

    /// Header terminated by `;` (e.g. `@import url(a.css);`)
    Statement,

    /// Header ran into the end of input or an enclosing `}`
    None,
}

/// A node of the rule tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    pub kind: RuleKind,

    /// Selector of a style rule. When present it is written in place of
    /// `prelude` on serialization.
    pub selector_text: Option<String>,

    /// Nested rules of a grouping rule, in source order
    pub child_rules: Vec<StyleRule>,

    /// Raw rule header, without surrounding trivia
    pub prelude: String,

    pub block: Block,

    /// Whitespace and comments before the header
    pub leading: String,

    /// Whitespace and comments between the header and `{` / `;`
    pub before_block: String,
}

impl StyleRule {
    /// Build a style rule, e.g. `StyleRule::style("p", "color: red;")`
    pub fn style(selector: impl Into<String>, declarations: &str) -> Self {
        let selector = selector.into();
        let declarations = declarations.trim();
        let contents = if declarations.is_empty() {
            " ".to_string()
        } else {
            format!(" {} ", declarations)
        };

        Self {
            kind: RuleKind::Style,
            selector_text: Some(selector.clone()),
            child_rules: Vec::new(),
            prelude: selector,
            block: Block::Raw {
                contents,
                closed: true,
            },
            leading: String::new(),
            before_block: " ".to_string(),
        }
    }

    /// Build a grouping rule from its header (`@media print`) and children
    pub fn group(prelude: impl Into<String>, child_rules: Vec<StyleRule>) -> Self {
        let prelude = prelude.into();
        let name = at_rule_name(&prelude).unwrap_or_default();

        Self {
            kind: RuleKind::Group { name },
            selector_text: None,
            child_rules: with_separators(child_rules),
            prelude,
            block: Block::Rules {
                trailing: " ".to_string(),
                closed: true,
            },
            leading: String::new(),
            before_block: " ".to_string(),
        }
    }

    /// Build a style rule that also carries nested rules
    pub fn nested(selector: impl Into<String>, child_rules: Vec<StyleRule>) -> Self {
        let selector = selector.into();

        Self {
            kind: RuleKind::Style,
            selector_text: Some(selector.clone()),
            child_rules: with_separators(child_rules),
            prelude: selector,
            block: Block::Rules {
                trailing: " ".to_string(),
                closed: true,
            },
            leading: String::new(),
            before_block: " ".to_string(),
        }
    }

    /// Header as it will be written out
    pub fn header(&self) -> &str {
        self.selector_text.as_deref().unwrap_or(&self.prelude)
    }

    /// Number of rules in this subtree, including this one
    pub fn rule_count(&self) -> usize {
        1 + self.child_rules.iter().map(StyleRule::rule_count).sum::<usize>()
    }
}

fn with_separators(mut rules: Vec<StyleRule>) -> Vec<StyleRule> {
    for rule in &mut rules {
        if rule.leading.is_empty() {
            rule.leading = " ".to_string();
        }
    }
    rules
}

/// Lowercase at-rule name of a header, without the `@`
pub fn at_rule_name(prelude: &str) -> Option<String> {
    let rest = prelude.strip_prefix('@')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name.to_ascii_lowercase())
    }
}

/// A parsed stylesheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<StyleRule>,

    /// Whitespace and comments after the last rule
    pub trailing: String,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<StyleRule>) -> Self {
        Self {
            rules,
            trailing: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules in the whole tree
    pub fn rule_count(&self) -> usize {
        self.rules.iter().map(StyleRule::rule_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rule_name() {
        assert_eq!(at_rule_name("@MEDIA screen"), Some("media".to_string()));
        assert_eq!(at_rule_name("@-webkit-keyframes spin"), Some("-webkit-keyframes".to_string()));
        assert_eq!(at_rule_name("p"), None);
        assert_eq!(at_rule_name("@"), None);
    }

    #[test]
    fn test_rule_count_includes_children() {
        let sheet = Stylesheet::from_rules(vec![
            StyleRule::style("p", "color: red;"),
            StyleRule::group(
                "@media print",
                vec![StyleRule::style("a", ""), StyleRule::style("b", "")],
            ),
        ]);

        assert_eq!(sheet.rule_count(), 4);
    }
}
