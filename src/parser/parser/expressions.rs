//! Expressions: precedence climbing over binary operators, then unary,
//! call/member chains and primaries.

use super::Parser;
use crate::parser::syntax_kind::SyntaxKind::{self, *};
use rowan::Checkpoint;

/// Binding power of a binary operator; 0 for anything else.
fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        QUESTION_QUESTION => 1,
        PIPE_PIPE => 2,
        AMP_AMP => 3,
        PIPE => 4,
        AMP => 5,
        EQ_EQ | EQ_EQ_EQ | BANG_EQ | BANG_EQ_EQ => 6,
        LT | GT | LT_EQ | GT_EQ => 7,
        PLUS | MINUS => 8,
        STAR | SLASH | PERCENT => 9,
        _ => 0,
    }
}

fn starts_expression(kind: SyntaxKind) -> bool {
    kind.is_name_token()
        || matches!(
            kind,
            NUMBER
                | STRING
                | TRUE_KW
                | FALSE_KW
                | NULL_KW
                | THIS_KW
                | NEW_KW
                | TYPEOF_KW
                | VOID_KW
                | L_PAREN
                | L_BRACKET
                | L_BRACE
                | BANG
                | MINUS
                | PLUS
                | PLUS_PLUS
                | MINUS_MINUS
        )
}

impl Parser<'_> {
    pub(super) fn at_expression_start(&self) -> bool {
        starts_expression(self.current())
    }

    pub(super) fn parse_expression(&mut self) {
        self.parse_assignment_expression();
    }

    pub(super) fn parse_assignment_expression(&mut self) {
        if self.at_arrow_function() {
            self.parse_arrow_function();
            return;
        }
        let cp = self.checkpoint();
        if !self.parse_binary_expression(0) {
            return;
        }
        if self.at_any(&[EQ, PLUS_EQ, MINUS_EQ]) {
            self.start_node_at(cp, BINARY_EXPRESSION);
            self.bump();
            self.parse_assignment_expression();
            self.finish_node();
        }
    }

    fn at_arrow_function(&self) -> bool {
        match self.current() {
            L_PAREN => self.kind_after_matching_paren(0) == FAT_ARROW,
            ASYNC_KW => match self.nth(1) {
                FAT_ARROW => true,
                L_PAREN => self.kind_after_matching_paren(1) == FAT_ARROW,
                next => next.is_name_token() && self.nth(2) == FAT_ARROW,
            },
            kind => kind.is_name_token() && self.nth(1) == FAT_ARROW,
        }
    }

    fn parse_arrow_function(&mut self) {
        self.start_node(ARROW_FUNCTION);
        if self.at(ASYNC_KW) && self.nth(1) != FAT_ARROW {
            self.bump();
        }
        if self.at(L_PAREN) {
            self.parse_parameter_list();
        } else {
            self.start_node(PARAMETER);
            self.parse_identifier();
            self.finish_node();
        }
        self.expect(FAT_ARROW);
        if self.at(L_BRACE) {
            self.parse_block();
        } else {
            self.parse_assignment_expression();
        }
        self.finish_node();
    }

    fn parse_binary_expression(&mut self, min_precedence: u8) -> bool {
        let cp = self.checkpoint();
        if !self.parse_unary_expression() {
            return false;
        }
        loop {
            let precedence = binary_precedence(self.current());
            if precedence <= min_precedence {
                break;
            }
            self.start_node_at(cp, BINARY_EXPRESSION);
            self.bump();
            if !self.parse_binary_expression(precedence) {
                self.error("expected expression");
            }
            self.finish_node();
        }
        true
    }

    fn parse_unary_expression(&mut self) -> bool {
        let prefix = match self.current() {
            BANG | MINUS | PLUS | PLUS_PLUS | MINUS_MINUS | TYPEOF_KW | VOID_KW => true,
            AWAIT_KW => starts_expression(self.nth(1)),
            _ => false,
        };
        if !prefix {
            return self.parse_postfix_expression();
        }
        self.start_node(PREFIX_UNARY_EXPRESSION);
        self.bump();
        if !self.parse_unary_expression() {
            self.error("expected expression");
        }
        self.finish_node();
        true
    }

    fn parse_postfix_expression(&mut self) -> bool {
        let cp = self.checkpoint();
        if !self.parse_left_hand_side_expression() {
            return false;
        }
        if self.at_any(&[PLUS_PLUS, MINUS_MINUS]) {
            self.start_node_at(cp, POSTFIX_UNARY_EXPRESSION);
            self.bump();
            self.finish_node();
        }
        true
    }

    fn parse_left_hand_side_expression(&mut self) -> bool {
        let cp = self.checkpoint();
        if self.at(NEW_KW) {
            self.parse_new_expression();
        } else if !self.parse_primary_expression() {
            return false;
        }
        self.parse_member_tail(cp, true);
        true
    }

    fn parse_new_expression(&mut self) {
        self.start_node(NEW_EXPRESSION);
        self.bump(); // new
        let cp = self.checkpoint();
        let callee = if self.at(NEW_KW) {
            self.parse_new_expression();
            true
        } else {
            self.parse_primary_expression()
        };
        if callee {
            self.parse_member_tail(cp, false);
            if self.at(L_PAREN) {
                self.parse_arguments();
            }
        }
        self.finish_node();
    }

    /// `.name`, `[expr]` and (when allowed) `(args)` suffixes, each wrapping
    /// everything parsed since `cp`.
    fn parse_member_tail(&mut self, cp: Checkpoint, allow_calls: bool) {
        loop {
            match self.current() {
                DOT => {
                    self.start_node_at(cp, PROPERTY_ACCESS_EXPRESSION);
                    self.bump();
                    self.parse_member_name();
                    self.finish_node();
                }
                L_BRACKET => {
                    self.start_node_at(cp, ELEMENT_ACCESS_EXPRESSION);
                    self.bump();
                    self.parse_expression();
                    self.expect(R_BRACKET);
                    self.finish_node();
                }
                L_PAREN if allow_calls => {
                    self.start_node_at(cp, CALL_EXPRESSION);
                    self.parse_arguments();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_arguments(&mut self) {
        self.bump(); // (
        while !self.at(R_PAREN) && !self.at_eof() {
            let before = self.pos;
            self.parse_assignment_expression();
            if !self.eat(COMMA) || self.pos == before {
                break;
            }
        }
        self.expect(R_PAREN);
    }

    fn parse_primary_expression(&mut self) -> bool {
        match self.current() {
            kind if kind.is_name_token() => {
                self.parse_identifier();
            }
            THIS_KW => {
                self.start_node(THIS_EXPRESSION);
                self.bump();
                self.finish_node();
            }
            NUMBER | STRING | TRUE_KW | FALSE_KW | NULL_KW => {
                self.start_node(LITERAL_EXPRESSION);
                self.bump();
                self.finish_node();
            }
            L_PAREN => {
                self.start_node(PARENTHESIZED_EXPRESSION);
                self.bump();
                self.parse_expression();
                self.expect(R_PAREN);
                self.finish_node();
            }
            L_BRACKET => self.parse_array_literal(),
            L_BRACE => self.parse_object_literal(),
            _ => {
                self.error("expected expression");
                return false;
            }
        }
        true
    }

    fn parse_array_literal(&mut self) {
        self.start_node(ARRAY_LITERAL_EXPRESSION);
        self.bump(); // [
        while !self.at(R_BRACKET) && !self.at_eof() {
            let before = self.pos;
            self.parse_assignment_expression();
            if !self.eat(COMMA) || self.pos == before {
                break;
            }
        }
        self.expect(R_BRACKET);
        self.finish_node();
    }

    fn parse_object_literal(&mut self) {
        self.start_node(OBJECT_LITERAL_EXPRESSION);
        self.bump(); // {
        while !self.at(R_BRACE) && !self.at_eof() {
            let before = self.pos;
            self.parse_object_literal_member();
            if self.pos == before {
                self.bump_error("expected property assignment");
                continue;
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(R_BRACE);
        self.finish_node();
    }

    fn parse_object_literal_member(&mut self) {
        if !self.nth_is_property_name(0) {
            return;
        }
        let cp = self.checkpoint();
        let shorthand = self.at_name() && matches!(self.nth(1), COMMA | R_BRACE);
        self.parse_property_name();

        if shorthand {
            self.start_node_at(cp, SHORTHAND_PROPERTY_ASSIGNMENT);
        } else if self.at_any(&[L_PAREN, LT]) {
            self.start_node_at(cp, METHOD_DECLARATION);
            self.parse_signature();
            self.parse_function_body_or_semicolon();
        } else {
            self.start_node_at(cp, PROPERTY_ASSIGNMENT);
            self.expect(COLON);
            self.parse_assignment_expression();
        }
        self.finish_node();
    }
}
