use std::fmt;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Regex match (`=~`)
    Match,
    /// Negated regex match (`!~`)
    NotMatch,
    /// Array containment (`@>`)
    Contains,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    // Access
    /// Member access (`.`)
    Dot,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation (`!`)
    Not,
    /// Integer negation (`-`)
    Negate,
}

/// Binding power of operators, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Or,
    And,
    Equality,
    Prefix,
    Call,
}

impl BinOp {
    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Or => Precedence::Or,
            BinOp::And => Precedence::And,
            BinOp::Equal | BinOp::NotEqual | BinOp::Match | BinOp::NotMatch | BinOp::Contains => {
                Precedence::Equality
            }
            BinOp::Dot => Precedence::Call,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::Match => "=~",
            BinOp::NotMatch => "!~",
            BinOp::Contains => "@>",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Dot => ".",
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
