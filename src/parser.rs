use crate::{
    ast::{BinOp, Expr, Precedence, Token, UnaryOp},
    lexer::Lexer,
};
use std::mem;

/// Deepest nesting of subexpressions the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Precedence-climbing parser for a single condition expression.
///
/// Syntax errors never abort the parse. They are collected and the parser
/// carries on, so one pass reports every independent problem. Check
/// [`errors`](Parser::errors) before trusting the returned tree.
///
/// Nesting is bounded by [`MAX_DEPTH`]. Past it the rest of the input is
/// skipped, so every tree the parser builds is at most that deep.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    errors: Vec<String>,
    depth: usize,
    too_deep: bool,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        Parser {
            lexer,
            current_token,
            errors: Vec::new(),
            depth: 0,
            too_deep: false,
        }
    }

    /// Diagnostics collected so far, in the order they were found.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn error(&mut self, message: String) {
        // Anything after the depth error is noise from unwinding.
        if self.too_deep {
            return;
        }
        log::debug!("parse error: {}", message);
        self.errors.push(message);
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    /// Goes one level deeper, or reports the depth error and skips to the
    /// end of the input.
    fn descend(&mut self) -> bool {
        self.depth += 1;
        if self.depth <= MAX_DEPTH {
            return true;
        }

        self.error(format!(
            "expression nesting exceeds maximum depth of {}",
            MAX_DEPTH
        ));
        self.too_deep = true;
        while !self.check(&Token::Eof) {
            self.advance();
        }
        false
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Consumes `expected` or records an error. The offending token is
    /// left in place so the caller can keep going.
    fn expect(&mut self, expected: Token) -> bool {
        if self.check(&expected) {
            self.advance();
            true
        } else {
            self.error(format!(
                "expected next token to be {}, got {} instead",
                expected, self.current_token
            ));
            false
        }
    }

    fn infix_op(&self) -> Option<BinOp> {
        match &self.current_token {
            Token::Or => Some(BinOp::Or),
            Token::And => Some(BinOp::And),
            Token::EqEq => Some(BinOp::Equal),
            Token::NotEq => Some(BinOp::NotEqual),
            Token::Match => Some(BinOp::Match),
            Token::NotMatch => Some(BinOp::NotMatch),
            Token::Contains => Some(BinOp::Contains),
            Token::Dot => Some(BinOp::Dot),
            _ => None,
        }
    }

    /// Parse primary expressions: literals, identifiers, calls, prefix
    /// operations, groups and arrays.
    fn parse_primary(&mut self) -> Option<Expr> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            // Literals
            Token::Integer(literal) => {
                self.advance();
                match literal.parse::<i64>() {
                    Ok(n) => Some(Expr::Integer(n)),
                    Err(_) => {
                        self.error(format!("could not parse {:?} as integer", literal));
                        None
                    }
                }
            }
            Token::String(s) => {
                self.advance();
                Some(Expr::String(s))
            }
            Token::Regexp(pattern) => {
                self.advance();
                Some(Expr::Regexp(pattern))
            }
            Token::Boolean(b) => {
                self.advance();
                Some(Expr::Boolean(b))
            }

            // Identifier, or a call when directly followed by '('
            Token::Identifier(name) => {
                self.advance();
                if self.check(&Token::LParen) {
                    self.advance();
                    let args = self.parse_expression_list(Token::RParen);
                    Some(Expr::Call {
                        function: name,
                        args,
                    })
                } else {
                    Some(Expr::Identifier(name))
                }
            }

            Token::Bang => {
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Some(Expr::prefix(UnaryOp::Not, right))
            }
            Token::Minus => {
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Some(Expr::prefix(UnaryOp::Negate, right))
            }

            Token::LParen => {
                self.advance();
                let expr = self.parse_expression(Precedence::Lowest);
                self.expect(Token::RParen);
                expr
            }
            Token::LBracket => {
                self.advance();
                Some(Expr::Array(self.parse_expression_list(Token::RBracket)))
            }

            Token::Illegal(ch) => {
                self.advance();
                self.error(format!("illegal character '{}'", ch));
                None
            }
            Token::Eof => {
                self.error("unexpected end of input".to_string());
                None
            }
            token => {
                self.error(format!("no prefix parse function for {} found", token));
                self.current_token = token;
                None
            }
        }
    }

    /// Comma separated expressions up to `end`. The opening delimiter has
    /// already been consumed.
    fn parse_expression_list(&mut self, end: Token) -> Vec<Expr> {
        let mut items = vec![];

        if self.check(&end) {
            self.advance();
            return items;
        }

        items.extend(self.parse_expression(Precedence::Lowest));

        while self.check(&Token::Comma) {
            self.advance();
            items.extend(self.parse_expression(Precedence::Lowest));
        }

        self.expect(end);
        items
    }

    /// Parses an expression whose operators all bind tighter than
    /// `precedence`. Binary operators are left-associative.
    pub fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let depth = self.depth;
        let expr = self.parse_nested(precedence);
        self.depth = depth;
        expr
    }

    fn parse_nested(&mut self, precedence: Precedence) -> Option<Expr> {
        if !self.descend() {
            return None;
        }
        let mut left = self.parse_primary()?;

        while let Some(op) = self.infix_op() {
            if precedence >= op.precedence() {
                break;
            }
            // Each fold makes the left operand one level deeper.
            if !self.descend() {
                return None;
            }
            self.advance();

            match self.parse_expression(op.precedence()) {
                Some(right) => left = Expr::infix(op, left, right),
                None => return Some(left),
            }
        }
        Some(left)
    }

    /// Parses the whole input as one expression.
    ///
    /// A tree is returned whenever any part of the input could be parsed,
    /// even if errors were recorded along the way, unless nesting went past
    /// [`MAX_DEPTH`].
    pub fn parse(&mut self) -> Option<Expr> {
        let expr = self.parse_expression(Precedence::Lowest);
        if self.too_deep {
            return None;
        }
        if !self.check(&Token::Eof) {
            let token = self.current_token.clone();
            self.error(format!("expected end of input, got {}", token));
        }
        expr
    }
}
