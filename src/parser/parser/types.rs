//! Type annotations: unions, intersections, arrays and references.

use super::Parser;
use crate::parser::syntax_kind::SyntaxKind::*;

impl Parser<'_> {
    /// `: Type` if present.
    pub(super) fn parse_type_annotation_opt(&mut self) {
        if self.eat(COLON) {
            self.parse_type();
        }
    }

    pub(super) fn parse_type(&mut self) {
        let cp = self.checkpoint();
        let leading = self.eat(PIPE);
        self.parse_intersection_type();
        if leading || self.at(PIPE) {
            self.start_node_at(cp, UNION_TYPE);
            while self.eat(PIPE) {
                self.parse_intersection_type();
            }
            self.finish_node();
        }
    }

    fn parse_intersection_type(&mut self) {
        let cp = self.checkpoint();
        self.parse_array_type();
        if self.at(AMP) {
            self.start_node_at(cp, INTERSECTION_TYPE);
            while self.eat(AMP) {
                self.parse_array_type();
            }
            self.finish_node();
        }
    }

    fn parse_array_type(&mut self) {
        let cp = self.checkpoint();
        if !self.parse_primary_type() {
            return;
        }
        while self.at(L_BRACKET) && self.nth(1) == R_BRACKET {
            self.start_node_at(cp, ARRAY_TYPE);
            self.bump();
            self.bump();
            self.finish_node();
        }
    }

    fn parse_primary_type(&mut self) -> bool {
        match self.current() {
            ANY_KW | BOOLEAN_KW | NEVER_KW | NUMBER_KW | OBJECT_KW | STRING_KW | SYMBOL_KW
            | UNKNOWN_KW | VOID_KW | NULL_KW
                if self.nth(1) != DOT =>
            {
                self.start_node(KEYWORD_TYPE);
                self.bump();
                self.finish_node();
            }
            STRING | NUMBER | TRUE_KW | FALSE_KW => {
                self.start_node(LITERAL_TYPE);
                self.bump();
                self.finish_node();
            }
            L_BRACE => {
                self.start_node(TYPE_LITERAL);
                self.parse_type_members();
                self.finish_node();
            }
            L_PAREN => {
                self.start_node(PARENTHESIZED_TYPE);
                self.bump();
                self.parse_type();
                self.expect(R_PAREN);
                self.finish_node();
            }
            kind if kind.is_name_token() => self.parse_type_reference(),
            _ => {
                self.error("expected type");
                return false;
            }
        }
        true
    }

    /// `A`, `A.B.C`, optionally followed by `<T, U>`.
    pub(super) fn parse_type_reference(&mut self) {
        self.start_node(TYPE_REFERENCE);
        let cp = self.checkpoint();
        self.parse_identifier();
        while self.at(DOT) {
            self.start_node_at(cp, QUALIFIED_NAME);
            self.bump();
            self.parse_member_name();
            self.finish_node();
        }
        if self.at(LT) {
            self.bump();
            while !self.at(GT) && !self.at_eof() {
                let before = self.pos;
                self.parse_type();
                if !self.eat(COMMA) || self.pos == before {
                    break;
                }
            }
            self.expect(GT);
        }
        self.finish_node();
    }
}
