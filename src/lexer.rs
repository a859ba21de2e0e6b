use crate::ast::Token;

/// Turns condition source text into tokens, one at a time.
///
/// The lexer never fails. Characters it does not understand come back as
/// [`Token::Illegal`] for the parser to report.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Skips whitespace and `#` comments up to the end of the line.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_whitespace() {
                self.advance();
            } else if ch == '#' {
                while let Some(c) = self.current_char() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        number
    }

    /// Reads up to the closing delimiter. Returns `None` when the input ends
    /// first; everything up to the end is consumed either way.
    fn read_delimited(&mut self, delimiter: char) -> Option<String> {
        let mut result = String::new();
        self.advance(); // Consume opening delimiter

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == delimiter {
                return Some(result);
            }
            result.push(ch);
        }
        None
    }

    /// Emits `token` if the next char is `second`, otherwise `single`.
    fn two_char(&mut self, second: char, token: Token, single: Token) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            token
        } else {
            self.advance();
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.current_char() {
            None => Token::Eof,
            Some('=') => match self.peek_char(1) {
                Some('=') => self.two_char('=', Token::EqEq, Token::Illegal('=')),
                Some('~') => self.two_char('~', Token::Match, Token::Illegal('=')),
                _ => {
                    self.advance();
                    Token::Illegal('=')
                }
            },
            Some('!') => match self.peek_char(1) {
                Some('=') => self.two_char('=', Token::NotEq, Token::Bang),
                Some('~') => self.two_char('~', Token::NotMatch, Token::Bang),
                _ => {
                    self.advance();
                    Token::Bang
                }
            },
            Some('&') => self.two_char('&', Token::And, Token::Illegal('&')),
            Some('|') => self.two_char('|', Token::Or, Token::Illegal('|')),
            Some('@') => self.two_char('>', Token::Contains, Token::Illegal('@')),
            Some('-') => {
                self.advance();
                Token::Minus
            }
            Some('.') => {
                self.advance();
                Token::Dot
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('(') => {
                self.advance();
                Token::LParen
            }
            Some(')') => {
                self.advance();
                Token::RParen
            }
            Some('[') => {
                self.advance();
                Token::LBracket
            }
            Some(']') => {
                self.advance();
                Token::RBracket
            }
            Some(quote @ ('"' | '\'')) => match self.read_delimited(quote) {
                Some(s) => Token::String(s),
                None => Token::Illegal(quote),
            },
            Some('/') => match self.read_delimited('/') {
                Some(pattern) => Token::Regexp(pattern),
                None => Token::Illegal('/'),
            },
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) if ch.is_ascii_digit() => Token::Integer(self.read_number()),
            Some(ch) => {
                self.advance();
                Token::Illegal(ch)
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields tokens up to, but not including, [`Token::Eof`].
    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false truthy");
    assert_eq!(lexer.next_token(), Token::Boolean(true));
    assert_eq!(lexer.next_token(), Token::Boolean(false));
    assert_eq!(lexer.next_token(), Token::Identifier("truthy".to_string()));
    assert_eq!(lexer.next_token(), Token::Eof);
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("a");
    assert_eq!(lexer.next_token(), Token::Identifier("a".to_string()));
    assert_eq!(lexer.next_token(), Token::Eof);
    assert_eq!(lexer.next_token(), Token::Eof);
    assert_eq!(lexer.next_token(), Token::Eof);
}

#[test]
fn test_branch_condition() {
    let mut lexer = Lexer::new("build.branch == 'main'");
    assert_eq!(lexer.next_token(), Token::Identifier("build".to_string()));
    assert_eq!(lexer.next_token(), Token::Dot);
    assert_eq!(lexer.next_token(), Token::Identifier("branch".to_string()));
    assert_eq!(lexer.next_token(), Token::EqEq);
    assert_eq!(lexer.next_token(), Token::String("main".to_string()));
    assert_eq!(lexer.next_token(), Token::Eof);
}
