//! Statements and declarations.

use super::Parser;
use crate::parser::syntax_kind::SyntaxKind::{self, *};
use rowan::Checkpoint;

/// Tokens where statement-level error recovery stops.
const STATEMENT_RECOVERY: &[SyntaxKind] = &[
    SEMICOLON,
    R_BRACE,
    L_BRACE,
    VAR_KW,
    LET_KW,
    CONST_KW,
    FUNCTION_KW,
    CLASS_KW,
    INTERFACE_KW,
    TYPE_KW,
    ENUM_KW,
    NAMESPACE_KW,
    MODULE_KW,
    IMPORT_KW,
    EXPORT_KW,
    IF_KW,
    RETURN_KW,
];

/// Keywords that may follow `declare`.
const DECLARATION_STARTS: &[SyntaxKind] = &[
    VAR_KW,
    LET_KW,
    CONST_KW,
    FUNCTION_KW,
    CLASS_KW,
    ENUM_KW,
    NAMESPACE_KW,
    MODULE_KW,
    INTERFACE_KW,
    TYPE_KW,
    ABSTRACT_KW,
    ASYNC_KW,
];

const CLASS_MEMBER_MODIFIERS: &[SyntaxKind] = &[
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    STATIC_KW,
    READONLY_KW,
    ABSTRACT_KW,
    ASYNC_KW,
    DECLARE_KW,
];

const PARAMETER_MODIFIERS: &[SyntaxKind] = &[PUBLIC_KW, PRIVATE_KW, PROTECTED_KW, READONLY_KW];

impl Parser<'_> {
    /// Parse statements until `end` (not consumed) or end of input.
    pub(super) fn parse_statements(&mut self, end: SyntaxKind) {
        while !self.at_eof() && !self.at(end) {
            let before = self.pos;
            self.parse_statement();
            if self.pos == before {
                self.error_recover("expected statement", STATEMENT_RECOVERY);
            }
        }
    }

    fn parse_statement(&mut self) {
        let cp = self.checkpoint();
        let has_modifiers = self.parse_statement_modifiers();

        match self.current() {
            VAR_KW | CONST_KW => self.parse_variable_statement(cp),
            LET_KW if self.nth_is_name(1) => self.parse_variable_statement(cp),
            FUNCTION_KW => self.parse_function_declaration(cp),
            CLASS_KW => self.parse_class_declaration(cp),
            INTERFACE_KW if self.nth_is_name(1) => self.parse_interface_declaration(cp),
            TYPE_KW if self.nth_is_name(1) => self.parse_type_alias_declaration(cp),
            ENUM_KW => self.parse_enum_declaration(cp),
            NAMESPACE_KW | MODULE_KW if self.nth_is_name(1) || self.nth(1) == STRING => {
                self.parse_module_declaration(cp)
            }
            _ if has_modifiers => {
                self.start_node_at(cp, ERROR);
                self.error("expected declaration after modifiers");
                self.finish_node();
            }
            IMPORT_KW => self.parse_import_declaration(),
            L_BRACE => self.parse_block(),
            IF_KW => self.parse_if_statement(),
            RETURN_KW => self.parse_return_statement(),
            SEMICOLON => {
                self.start_node(EMPTY_STATEMENT);
                self.bump();
                self.finish_node();
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Consume leading declaration modifiers; they become tokens of the
    /// declaration node started at the caller's checkpoint.
    fn parse_statement_modifiers(&mut self) -> bool {
        let mut any = false;
        loop {
            let is_modifier = match self.current() {
                EXPORT_KW => true,
                DEFAULT_KW => any,
                DECLARE_KW => DECLARATION_STARTS.contains(&self.nth(1)),
                ABSTRACT_KW => self.nth(1) == CLASS_KW,
                ASYNC_KW => self.nth(1) == FUNCTION_KW,
                CONST_KW => self.nth(1) == ENUM_KW,
                _ => false,
            };
            if !is_modifier {
                return any;
            }
            self.bump();
            any = true;
        }
    }

    /// A statement in `if`/`else` position.
    fn parse_embedded_statement(&mut self) {
        let before = self.pos;
        self.parse_statement();
        if self.pos == before {
            self.error("expected statement");
        }
    }

    // =========================================================================
    // Variables and functions
    // =========================================================================

    fn parse_variable_statement(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, VARIABLE_STATEMENT);
        self.start_node(VARIABLE_DECLARATION_LIST);
        self.bump(); // var / let / const
        loop {
            self.parse_variable_declaration();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.finish_node();
        self.eat(SEMICOLON);
        self.finish_node();
    }

    fn parse_variable_declaration(&mut self) {
        self.start_node(VARIABLE_DECLARATION);
        self.parse_identifier();
        self.parse_type_annotation_opt();
        if self.eat(EQ) {
            self.parse_assignment_expression();
        }
        self.finish_node();
    }

    fn parse_function_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, FUNCTION_DECLARATION);
        self.bump(); // function
        self.parse_identifier();
        self.parse_signature();
        self.parse_function_body_or_semicolon();
        self.finish_node();
    }

    /// Type parameters, parameter list and return type.
    pub(super) fn parse_signature(&mut self) {
        if self.at(LT) {
            self.parse_type_parameters();
        }
        self.parse_parameter_list();
        self.parse_type_annotation_opt();
    }

    /// Body block, or `;` for overload signatures and abstract members.
    pub(super) fn parse_function_body_or_semicolon(&mut self) {
        if self.at(L_BRACE) {
            self.parse_block();
        } else {
            self.eat(SEMICOLON);
        }
    }

    pub(super) fn parse_parameter_list(&mut self) {
        if !self.expect(L_PAREN) {
            return;
        }
        while !self.at(R_PAREN) && !self.at_eof() {
            let before = self.pos;
            self.parse_parameter();
            if !self.eat(COMMA) || self.pos == before {
                break;
            }
        }
        self.expect(R_PAREN);
    }

    fn parse_parameter(&mut self) {
        self.start_node(PARAMETER);
        while self.at_any(PARAMETER_MODIFIERS) && self.nth_is_name(1) {
            self.bump();
        }
        self.parse_identifier();
        self.eat(QUESTION);
        self.parse_type_annotation_opt();
        if self.eat(EQ) {
            self.parse_assignment_expression();
        }
        self.finish_node();
    }

    pub(super) fn parse_type_parameters(&mut self) {
        self.bump(); // <
        while !self.at(GT) && !self.at_eof() {
            self.start_node(TYPE_PARAMETER);
            self.parse_identifier();
            if self.eat(EXTENDS_KW) {
                self.parse_type();
            }
            if self.eat(EQ) {
                self.parse_type();
            }
            self.finish_node();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(GT);
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn parse_class_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, CLASS_DECLARATION);
        self.bump(); // class
        if self.at_name() && !self.at(IMPLEMENTS_KW) {
            self.parse_identifier();
        } else {
            self.error("expected class name");
        }
        if self.at(LT) {
            self.parse_type_parameters();
        }
        self.parse_heritage_clauses();
        self.parse_class_body();
        self.finish_node();
    }

    fn parse_heritage_clauses(&mut self) {
        while self.at_any(&[EXTENDS_KW, IMPLEMENTS_KW]) {
            self.start_node(HERITAGE_CLAUSE);
            self.bump();
            loop {
                self.parse_type_reference();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.finish_node();
        }
    }

    fn parse_class_body(&mut self) {
        if !self.expect(L_BRACE) {
            return;
        }
        while !self.at(R_BRACE) && !self.at_eof() {
            if self.eat(SEMICOLON) {
                continue;
            }
            let before = self.pos;
            self.parse_class_member();
            if self.pos == before {
                self.bump_error("expected class member");
            }
        }
        self.expect(R_BRACE);
    }

    fn parse_class_member(&mut self) {
        let cp = self.checkpoint();
        let mut has_modifiers = false;
        while self.at_any(CLASS_MEMBER_MODIFIERS) && self.nth_is_property_name(1) {
            self.bump();
            has_modifiers = true;
        }

        let kind = self.current();
        if matches!(kind, GET_KW | SET_KW) && self.nth_is_property_name(1) {
            let node = if kind == GET_KW { GET_ACCESSOR } else { SET_ACCESSOR };
            self.start_node_at(cp, node);
            self.bump();
            self.parse_property_name();
            self.parse_signature();
            self.parse_function_body_or_semicolon();
            self.finish_node();
            return;
        }
        if kind == CONSTRUCTOR_KW && self.nth(1) == L_PAREN {
            self.start_node_at(cp, CONSTRUCTOR);
            self.bump();
            self.parse_signature();
            self.parse_function_body_or_semicolon();
            self.finish_node();
            return;
        }
        if !self.nth_is_property_name(0) {
            if has_modifiers {
                self.start_node_at(cp, ERROR);
                self.error("expected member name");
                self.finish_node();
            }
            return;
        }

        self.parse_property_name();
        self.eat(QUESTION);
        if self.at_any(&[L_PAREN, LT]) {
            self.start_node_at(cp, METHOD_DECLARATION);
            self.parse_signature();
            self.parse_function_body_or_semicolon();
        } else {
            self.start_node_at(cp, PROPERTY_DECLARATION);
            self.parse_type_annotation_opt();
            if self.eat(EQ) {
                self.parse_assignment_expression();
            }
            self.eat(SEMICOLON);
        }
        self.finish_node();
    }

    // =========================================================================
    // Interfaces, type aliases, enums
    // =========================================================================

    fn parse_interface_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, INTERFACE_DECLARATION);
        self.bump(); // interface
        self.parse_identifier();
        if self.at(LT) {
            self.parse_type_parameters();
        }
        self.parse_heritage_clauses();
        self.parse_type_members();
        self.finish_node();
    }

    /// `{ member; member; }` of an interface or type literal.
    pub(super) fn parse_type_members(&mut self) {
        if !self.expect(L_BRACE) {
            return;
        }
        while !self.at(R_BRACE) && !self.at_eof() {
            let before = self.pos;
            self.parse_type_member();
            if self.pos == before {
                self.bump_error("expected property or signature");
            }
        }
        self.expect(R_BRACE);
    }

    fn parse_type_member(&mut self) {
        let cp = self.checkpoint();
        let readonly = self.at(READONLY_KW) && self.nth_is_property_name(1);
        if readonly {
            self.bump();
        }
        if !self.nth_is_property_name(0) {
            if readonly {
                self.start_node_at(cp, ERROR);
                self.error("expected member name");
                self.finish_node();
            }
            return;
        }

        self.parse_property_name();
        self.eat(QUESTION);
        if self.at_any(&[L_PAREN, LT]) {
            self.start_node_at(cp, METHOD_SIGNATURE);
            self.parse_signature();
        } else {
            self.start_node_at(cp, PROPERTY_SIGNATURE);
            self.parse_type_annotation_opt();
        }
        if !self.eat(SEMICOLON) {
            self.eat(COMMA);
        }
        self.finish_node();
    }

    fn parse_type_alias_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, TYPE_ALIAS_DECLARATION);
        self.bump(); // type
        self.parse_identifier();
        if self.at(LT) {
            self.parse_type_parameters();
        }
        self.expect(EQ);
        self.parse_type();
        self.eat(SEMICOLON);
        self.finish_node();
    }

    fn parse_enum_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, ENUM_DECLARATION);
        self.bump(); // enum
        self.parse_identifier();
        if self.expect(L_BRACE) {
            while !self.at(R_BRACE) && !self.at_eof() {
                if !self.nth_is_property_name(0) {
                    self.bump_error("expected enum member");
                    continue;
                }
                self.start_node(ENUM_MEMBER);
                self.parse_property_name();
                if self.eat(EQ) {
                    self.parse_assignment_expression();
                }
                self.finish_node();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_BRACE);
        }
        self.finish_node();
    }

    // =========================================================================
    // Namespaces and imports
    // =========================================================================

    fn parse_module_declaration(&mut self, cp: Checkpoint) {
        self.start_node_at(cp, MODULE_DECLARATION);
        self.bump(); // namespace / module
        self.parse_module_remainder();
        self.finish_node();
    }

    /// `A.B.C { ... }` nests one MODULE_DECLARATION per dotted segment.
    fn parse_module_remainder(&mut self) {
        if self.at(STRING) {
            self.bump();
        } else {
            self.parse_identifier();
        }
        if self.at(DOT) {
            self.bump();
            self.start_node(MODULE_DECLARATION);
            self.parse_module_remainder();
            self.finish_node();
        } else if self.at(L_BRACE) {
            self.start_node(MODULE_BLOCK);
            self.bump();
            self.parse_statements(R_BRACE);
            self.expect(R_BRACE);
            self.finish_node();
        } else {
            self.eat(SEMICOLON);
        }
    }

    fn parse_import_declaration(&mut self) {
        self.start_node(IMPORT_DECLARATION);
        self.bump(); // import
        if self.at(STRING) {
            self.bump();
        } else {
            self.parse_import_clause();
            self.expect(FROM_KW);
            self.expect(STRING);
        }
        self.eat(SEMICOLON);
        self.finish_node();
    }

    fn parse_import_clause(&mut self) {
        self.start_node(IMPORT_CLAUSE);
        if self.at_name() && !(self.at(FROM_KW) && self.nth(1) == STRING) {
            self.parse_identifier();
            self.eat(COMMA);
        }
        if self.at(STAR) {
            self.start_node(NAMESPACE_IMPORT);
            self.bump();
            self.expect(AS_KW);
            self.parse_identifier();
            self.finish_node();
        } else if self.at(L_BRACE) {
            self.start_node(NAMED_IMPORTS);
            self.bump();
            while !self.at(R_BRACE) && !self.at_eof() {
                if !self.nth_is_property_name(0) {
                    break;
                }
                self.start_node(IMPORT_SPECIFIER);
                self.parse_property_name();
                if self.eat(AS_KW) {
                    self.parse_identifier();
                }
                self.finish_node();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(R_BRACE);
            self.finish_node();
        }
        self.finish_node();
    }

    // =========================================================================
    // Other statements
    // =========================================================================

    pub(super) fn parse_block(&mut self) {
        self.start_node(BLOCK);
        self.bump(); // {
        self.parse_statements(R_BRACE);
        self.expect(R_BRACE);
        self.finish_node();
    }

    fn parse_if_statement(&mut self) {
        self.start_node(IF_STATEMENT);
        self.bump(); // if
        self.expect(L_PAREN);
        self.parse_expression();
        self.expect(R_PAREN);
        self.parse_embedded_statement();
        if self.eat(ELSE_KW) {
            self.parse_embedded_statement();
        }
        self.finish_node();
    }

    fn parse_return_statement(&mut self) {
        self.start_node(RETURN_STATEMENT);
        self.bump(); // return
        if !self.at_any(&[SEMICOLON, R_BRACE, EOF]) {
            self.parse_expression();
        }
        self.eat(SEMICOLON);
        self.finish_node();
    }

    fn parse_expression_statement(&mut self) {
        if !self.at_expression_start() {
            return;
        }
        self.start_node(EXPRESSION_STATEMENT);
        self.parse_expression();
        self.eat(SEMICOLON);
        self.finish_node();
    }
}
