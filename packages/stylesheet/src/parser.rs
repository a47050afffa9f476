//! Rule-level stylesheet parser
//!
//! Splits stylesheet text into a tree of rules. Declaration blocks are not
//! parsed; only grouping at-rules get their contents parsed into child
//! rules. Parsing never fails: anything that does not look like a rule is
//! kept as a `RuleKind::Unknown` node so the text still round-trips.

use crate::ast::{at_rule_name, Block, RuleKind, StyleRule, Stylesheet};
use crate::lexer::{lex, SpannedToken, Token};

/// At-rules whose block contains rules rather than declarations
const GROUPING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "container",
    "layer",
    "document",
    "-moz-document",
    "scope",
    "starting-style",
];

/// Parse stylesheet text into a rule tree
pub fn parse(source: &str) -> Stylesheet {
    Parser::new(source).parse_stylesheet()
}

pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: lex(source),
            pos: 0,
        }
    }

    pub fn parse_stylesheet(mut self) -> Stylesheet {
        let (rules, trailing) = self.parse_rule_list(false);
        Stylesheet { rules, trailing }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|t| t.token)
    }

    /// Byte offset of the next token (or end of input)
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.source[start..end].to_string()
    }

    fn skip_trivia(&mut self) {
        while self.peek().is_some_and(Token::is_trivia) {
            self.pos += 1;
        }
    }

    fn parse_rule_list(&mut self, nested: bool) -> (Vec<StyleRule>, String) {
        let mut rules = Vec::new();

        loop {
            let leading_start = self.offset();
            self.skip_trivia();

            match self.peek() {
                None => return (rules, self.slice(leading_start, self.offset())),
                Some(Token::RBrace) if nested => {
                    return (rules, self.slice(leading_start, self.offset()))
                }
                _ => {}
            }

            let leading = self.slice(leading_start, self.offset());
            rules.push(self.parse_rule(leading, nested));
        }
    }

    fn parse_rule(&mut self, leading: String, nested: bool) -> StyleRule {
        let start = self.offset();
        let first = self.peek();
        let mut prelude_end = start;

        // Scan the header up to `{`, `;`, `}` or end of input
        while let Some(token) = self.peek() {
            match token {
                Token::LBrace | Token::Semi => break,
                Token::RBrace if nested => break,
                Token::RBrace => {
                    // Stray `}` at the top level becomes part of an unknown fragment
                    prelude_end = self.tokens[self.pos].span.end;
                    self.pos += 1;
                    return StyleRule {
                        kind: RuleKind::Unknown,
                        selector_text: None,
                        child_rules: Vec::new(),
                        prelude: self.slice(start, prelude_end),
                        block: Block::None,
                        leading,
                        before_block: String::new(),
                    };
                }
                t => {
                    if !t.is_trivia() {
                        prelude_end = self.tokens[self.pos].span.end;
                    }
                    self.pos += 1;
                }
            }
        }

        let prelude = self.slice(start, prelude_end);
        let before_block = self.slice(prelude_end, self.offset());
        let at_name = match first {
            Some(Token::AtKeyword) => at_rule_name(&prelude),
            _ => None,
        };

        let (kind, block, child_rules) = match self.peek() {
            Some(Token::LBrace) => {
                self.pos += 1;
                match at_name {
                    Some(name) if GROUPING_AT_RULES.contains(&name.as_str()) => {
                        let (children, trailing) = self.parse_rule_list(true);
                        let closed = self.eat(Token::RBrace);
                        (
                            RuleKind::Group { name },
                            Block::Rules { trailing, closed },
                            children,
                        )
                    }
                    Some(name) => (RuleKind::AtRule { name }, self.parse_raw_block(), Vec::new()),
                    // A block with no header at all is not a style rule
                    None if prelude.is_empty() => {
                        (RuleKind::Unknown, self.parse_raw_block(), Vec::new())
                    }
                    None => (RuleKind::Style, self.parse_raw_block(), Vec::new()),
                }
            }
            Some(Token::Semi) => {
                self.pos += 1;
                let kind = match at_name {
                    Some(name) => RuleKind::AtRule { name },
                    None => RuleKind::Unknown,
                };
                (kind, Block::Statement, Vec::new())
            }
            _ => (RuleKind::Unknown, Block::None, Vec::new()),
        };

        let selector_text = match kind {
            RuleKind::Style => Some(prelude.clone()),
            _ => None,
        };

        StyleRule {
            kind,
            selector_text,
            child_rules,
            prelude,
            block,
            leading,
            before_block,
        }
    }

    /// Consume a block body up to its matching `}`. The opening brace has
    /// already been consumed.
    fn parse_raw_block(&mut self) -> Block {
        let start = self.offset();
        let mut depth = 1usize;

        while let Some(token) = self.peek() {
            match token {
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        let contents = self.slice(start, self.offset());
                        self.pos += 1;
                        return Block::Raw {
                            contents,
                            closed: true,
                        };
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }

        Block::Raw {
            contents: self.slice(start, self.source.len()),
            closed: false,
        }
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}
