/// Filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    // Comparison
    /// Exact equality (`Equal`)
    Equal,
    /// Negated equality (`NotEqual`)
    NotEqual,
    /// Wildcard pattern match on text (`Like`)
    Like,
    /// Null / missing-value check (`IsNull`)
    IsNull,
    /// Strictly greater than (`GreaterThan`)
    GreaterThan,
    /// Strictly less than (`LessThan`)
    LessThan,
    /// Membership in a list of text values (`ContainsAny`)
    ContainsAny,

    // Composition
    /// Conjunction over sub-filters (`And`)
    And,
    /// Disjunction over sub-filters (`Or`)
    Or,
}

impl Operator {
    /// The wire tag used in node records and compiled documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "Equal",
            Operator::NotEqual => "NotEqual",
            Operator::Like => "Like",
            Operator::IsNull => "IsNull",
            Operator::GreaterThan => "GreaterThan",
            Operator::LessThan => "LessThan",
            Operator::ContainsAny => "ContainsAny",
            Operator::And => "And",
            Operator::Or => "Or",
        }
    }

    /// Parses a wire tag back into an operator.
    pub fn from_tag(tag: &str) -> Option<Operator> {
        match tag {
            "Equal" => Some(Operator::Equal),
            "NotEqual" => Some(Operator::NotEqual),
            "Like" => Some(Operator::Like),
            "IsNull" => Some(Operator::IsNull),
            "GreaterThan" => Some(Operator::GreaterThan),
            "LessThan" => Some(Operator::LessThan),
            "ContainsAny" => Some(Operator::ContainsAny),
            "And" => Some(Operator::And),
            "Or" => Some(Operator::Or),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
