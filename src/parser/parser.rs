//! Recursive descent parser for the TypeScript subset
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Trivia is never bumped on its own: it is flushed right before the next
//! significant token, so it lands inside whichever node is open at that
//! moment. A node's full range therefore starts at the leading trivia of its
//! first token, while its trimmed range starts at the token itself.

mod expressions;
mod statements;
mod types;

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source text into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input.len());
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    input_len: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], input_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            input_len,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_statements(SyntaxKind::EOF);
        self.bump_trivia();
        self.finish_node();
    }

    // =========================================================================
    // Token inspection (trivia is invisible to lookahead)
    // =========================================================================

    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    fn at_eof(&self) -> bool {
        self.current() == SyntaxKind::EOF
    }

    /// Identifier or contextual keyword in name position.
    fn at_name(&self) -> bool {
        self.current().is_name_token()
    }

    fn nth_is_name(&self, n: usize) -> bool {
        self.nth(n).is_name_token()
    }

    /// Check whether the significant token at `n` starts a property name.
    fn nth_is_property_name(&self, n: usize) -> bool {
        let kind = self.nth(n);
        kind.is_name_token()
            || kind.is_keyword()
            || matches!(kind, SyntaxKind::STRING | SyntaxKind::NUMBER)
    }

    /// Find the significant token after the parenthesis matching the one at
    /// the current position.
    fn kind_after_matching_paren(&self, start: usize) -> SyntaxKind {
        let mut depth = 0usize;
        let mut n = start;
        loop {
            match self.nth(n) {
                SyntaxKind::L_PAREN => depth += 1,
                SyntaxKind::R_PAREN => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self.nth(n + 1);
                    }
                }
                SyntaxKind::EOF => return SyntaxKind::EOF,
                _ => {}
            }
            n += 1;
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.bump_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    /// Bump the current token under a different kind (contextual keywords
    /// used as identifiers).
    fn bump_remap(&mut self, kind: SyntaxKind) {
        self.bump_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let end = u32::try_from(self.input_len).unwrap_or(u32::MAX);
        let range = self
            .nth_token(0)
            .map(|t| t.range())
            .unwrap_or_else(|| TextRange::empty(TextSize::new(end)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Wrap exactly one token in an ERROR node.
    fn bump_error(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// IDENTIFIER node around an identifier or contextual keyword.
    fn parse_identifier(&mut self) -> bool {
        if self.at_name() {
            self.start_node(SyntaxKind::IDENTIFIER);
            self.bump_remap(SyntaxKind::IDENT);
            self.finish_node();
            true
        } else {
            self.error("expected identifier");
            false
        }
    }

    /// Member name: identifiers and any keyword become IDENTIFIER nodes,
    /// string and numeric literals stay bare tokens.
    fn parse_property_name(&mut self) -> bool {
        let kind = self.current();
        if kind.is_name_token() || kind.is_keyword() {
            self.start_node(SyntaxKind::IDENTIFIER);
            self.bump_remap(SyntaxKind::IDENT);
            self.finish_node();
            true
        } else if matches!(kind, SyntaxKind::STRING | SyntaxKind::NUMBER) {
            self.bump();
            true
        } else {
            self.error("expected property name");
            false
        }
    }

    /// Name after `.`: keywords are allowed, literals are not.
    fn parse_member_name(&mut self) -> bool {
        if self.current().is_name_token() || self.current().is_keyword() {
            self.parse_property_name()
        } else {
            self.error("expected property name");
            false
        }
    }
}
