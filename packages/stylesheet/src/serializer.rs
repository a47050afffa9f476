//! Writes a rule tree back to stylesheet text
//!
//! Trivia captured by the parser is written back untouched, so the only
//! differences from the source are the selectors that were rewritten.

use crate::ast::{Block, StyleRule, Stylesheet};

/// Serialize a stylesheet to text
pub fn serialize(sheet: &Stylesheet) -> String {
    let mut output = String::new();

    for rule in &sheet.rules {
        serialize_rule(rule, &mut output);
    }
    output.push_str(&sheet.trailing);

    output
}

fn serialize_rule(rule: &StyleRule, output: &mut String) {
    output.push_str(&rule.leading);
    output.push_str(rule.header());
    output.push_str(&rule.before_block);

    match &rule.block {
        Block::Raw { contents, closed } => {
            output.push('{');
            output.push_str(contents);
            if *closed {
                output.push('}');
            }
        }
        Block::Rules { trailing, closed } => {
            output.push('{');
            for child in &rule.child_rules {
                serialize_rule(child, output);
            }
            output.push_str(trailing);
            if *closed {
                output.push('}');
            }
        }
        Block::Statement => output.push(';'),
        Block::None => {}
    }
}

impl Stylesheet {
    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_unmodified_tree_round_trips() {
        let sources = [
            "",
            "p { color: red; } #a { color: blue; } :root { --c: 1; }",
            "@charset \"utf-8\";\n@import url(a.css) screen;\n\nbody{margin:0}",
            "@media (min-width: 40em) {\n  a, b { x: 1 }\n  /* c */\n}\n",
            "@keyframes k { 0% { top: 0 } 100% { top: 1px } }",
            "a[title=\"}\"] { content: '{' }",
            "p { color: red",
            "} stray { } ;",
            "@media print { a { b: c }",
            "/* unterminated",
            "a { b: 'unterminated }",
        ];

        for source in sources {
            assert_eq!(parse(source).to_css(), source, "round trip of {:?}", source);
        }
    }

    #[test]
    fn test_rewritten_selector_is_written() {
        let mut sheet = parse("a {x:1}\n@media print { b {y:2} }");
        sheet.rules[0].selector_text = Some("main a".to_string());
        sheet.rules[1].child_rules[0].selector_text = Some("main b".to_string());

        assert_eq!(sheet.to_css(), "main a {x:1}\n@media print { main b {y:2} }");
    }

    #[test]
    fn test_constructed_rules() {
        let sheet = Stylesheet::from_rules(vec![StyleRule::group(
            "@media print",
            vec![StyleRule::style("a", "x: 1;")],
        )]);

        assert_eq!(sheet.to_css(), "@media print { a { x: 1; } }");
    }
}
