use std::fmt;

/// Lexical token produced by the [`Lexer`](crate::lexer::Lexer).
///
/// Tokens carry their literal text where the text matters. Integer literals
/// keep the raw digit run so that overflow is reported by the parser rather
/// than the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal, kept as the raw digit run
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 0
    /// ```
    Integer(String),

    /// String literal enclosed in single or double quotes
    ///
    /// The literal is the text between the quotes. No escape sequences
    /// are processed.
    ///
    /// # Examples
    /// ```text
    /// "main"
    /// 'v1.0.0'
    /// ```
    String(String),

    /// Regular expression literal enclosed in slashes
    ///
    /// # Examples
    /// ```text
    /// /^v[0-9]+/
    /// ```
    Regexp(String),

    /// `true` / `false` keywords
    Boolean(bool),

    // Identifiers
    /// Property, scope or function name
    ///
    /// # Examples
    /// ```text
    /// build
    /// pull_request
    /// env
    /// ```
    Identifier(String),

    // Operators
    /// Logical negation (`!`)
    Bang,

    /// Unary minus (`-`)
    Minus,

    /// Equality (`==`)
    EqEq,

    /// Inequality (`!=`)
    NotEq,

    /// Regex match (`=~`)
    ///
    /// # Examples
    /// ```text
    /// build.tag =~ /^v/
    /// ```
    Match,

    /// Negated regex match (`!~`)
    NotMatch,

    /// Array containment (`@>`)
    ///
    /// # Examples
    /// ```text
    /// ["llamas", "alpacas"] @> "alpacas"
    /// ```
    Contains,

    /// Logical AND (`&&`)
    And,

    /// Logical OR (`||`)
    Or,

    // Delimiters
    /// Member access (`.`)
    Dot,

    /// Separator for arguments and array elements
    Comma,

    LParen,
    RParen,
    LBracket,
    RBracket,

    /// Character the lexer does not recognise. Reported by the parser.
    Illegal(char),

    /// End of input. Repeated on every call once reached.
    Eof,
}

impl Token {
    /// Source text of the token, used in parser diagnostics and by the
    /// lexer tests.
    pub fn literal(&self) -> String {
        match self {
            Token::Integer(s) | Token::String(s) | Token::Regexp(s) | Token::Identifier(s) => {
                s.clone()
            }
            Token::Boolean(b) => b.to_string(),
            Token::Illegal(c) => c.to_string(),
            Token::Eof => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(s) | Token::Identifier(s) => write!(f, "{}", s),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Regexp(s) => write!(f, "/{}/", s),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::Bang => write!(f, "!"),
            Token::Minus => write!(f, "-"),
            Token::EqEq => write!(f, "=="),
            Token::NotEq => write!(f, "!="),
            Token::Match => write!(f, "=~"),
            Token::NotMatch => write!(f, "!~"),
            Token::Contains => write!(f, "@>"),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Illegal(c) => write!(f, "{}", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}
