use serde::{Deserialize, Serialize};

use super::Clause;
use crate::error::{AssemblyError, AssemblyResult};

/// Boolean connective between the two most recent operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Logic {
    And,
    Or,
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Logic::And => write!(f, "AND"),
            Logic::Or => write!(f, "OR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Clause(Clause),
    Logic(Logic),
}

/// Ordered token list of filter clauses and logic markers.
///
/// Every clause token is filter-kind. Composition prepends the incoming
/// operand and appends the marker, so `a.and(b).and(c)` reduces to
/// `a AND b AND c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseExpression {
    tokens: Vec<Token>,
}

impl ClauseExpression {
    /// Build from raw tokens, rejecting any non-filter clause.
    pub fn from_tokens(tokens: Vec<Token>) -> AssemblyResult<Self> {
        for token in &tokens {
            if let Token::Clause(clause) = token {
                clause.ensure_filter()?;
            }
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Clause tokens in order, skipping markers.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.tokens.iter().filter_map(|t| match t {
            Token::Clause(c) => Some(c),
            Token::Logic(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn and(&self, other: impl Into<FilterTerm>) -> AssemblyResult<ClauseExpression> {
        self.combine(other.into(), Logic::And)
    }

    pub fn or(&self, other: impl Into<FilterTerm>) -> AssemblyResult<ClauseExpression> {
        self.combine(other.into(), Logic::Or)
    }

    fn combine(&self, other: FilterTerm, logic: Logic) -> AssemblyResult<ClauseExpression> {
        let mut tokens = other.into_tokens();
        tokens.extend(self.tokens.iter().cloned());
        tokens.push(Token::Logic(logic));
        Self::from_tokens(tokens)
    }
}

impl TryFrom<Clause> for ClauseExpression {
    type Error = AssemblyError;

    fn try_from(clause: Clause) -> Result<Self, Self::Error> {
        Self::from_tokens(vec![Token::Clause(clause)])
    }
}

/// Anything that can stand where a filter is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTerm {
    Clause(Clause),
    Expression(ClauseExpression),
}

impl FilterTerm {
    pub fn into_tokens(self) -> Vec<Token> {
        match self {
            FilterTerm::Clause(clause) => vec![Token::Clause(clause)],
            FilterTerm::Expression(expr) => expr.into_tokens(),
        }
    }

    pub fn clauses(&self) -> Vec<&Clause> {
        match self {
            FilterTerm::Clause(clause) => vec![clause],
            FilterTerm::Expression(expr) => expr.clauses().collect(),
        }
    }

    /// Fold terms left to right with AND; `None` when there are none.
    pub fn conjunction<I>(terms: I) -> AssemblyResult<Option<ClauseExpression>>
    where
        I: IntoIterator<Item = FilterTerm>,
    {
        let mut folded: Option<ClauseExpression> = None;
        for term in terms {
            folded = Some(match folded {
                None => ClauseExpression::from_tokens(term.into_tokens())?,
                Some(expr) => expr.and(term)?,
            });
        }
        Ok(folded)
    }
}

impl From<Clause> for FilterTerm {
    fn from(clause: Clause) -> Self {
        FilterTerm::Clause(clause)
    }
}

impl From<ClauseExpression> for FilterTerm {
    fn from(expr: ClauseExpression) -> Self {
        FilterTerm::Expression(expr)
    }
}
