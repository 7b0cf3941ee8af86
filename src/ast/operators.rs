/// Comparison operators.
///
/// Written directly in front of a value (`>=5`, `!~draft`), or after a pair key
/// (`age:>=18`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than or equal (`<=`)
    Lte,
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Equal (`=`)
    Eq,
    /// Not equal (`!`)
    Neq,
    /// Fuzzy match (`~`)
    Fuzz,
    /// Negated fuzzy match (`!~`)
    Nfuzz,
}

impl CmpOp {
    /// Every operator, in the order of [`OPERATORS`].
    pub const ALL: [CmpOp; 8] = [
        CmpOp::Gte,
        CmpOp::Lte,
        CmpOp::Gt,
        CmpOp::Lt,
        CmpOp::Eq,
        CmpOp::Neq,
        CmpOp::Fuzz,
        CmpOp::Nfuzz,
    ];

    /// Wire name of the operator (`gte`, `nfuzz`, ...).
    pub fn name(self) -> &'static str {
        match self {
            CmpOp::Gte => "gte",
            CmpOp::Lte => "lte",
            CmpOp::Gt => "gt",
            CmpOp::Lt => "lt",
            CmpOp::Eq => "eq",
            CmpOp::Neq => "neq",
            CmpOp::Fuzz => "fuzz",
            CmpOp::Nfuzz => "nfuzz",
        }
    }

    /// Source text of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gte => ">=",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Eq => "=",
            CmpOp::Neq => "!",
            CmpOp::Fuzz => "~",
            CmpOp::Nfuzz => "!~",
        }
    }

    pub fn from_name(name: &str) -> Option<CmpOp> {
        CmpOp::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `(name, symbol)` pairs for every comparison operator.
pub const OPERATORS: [(&str, &str); 8] = [
    ("gte", ">="),
    ("lte", "<="),
    ("gt", ">"),
    ("lt", "<"),
    ("eq", "="),
    ("neq", "!"),
    ("fuzz", "~"),
    ("nfuzz", "!~"),
];
