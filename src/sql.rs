//! SQL renderer that turns a token sequence into a `WHERE` condition using sea-query.
//!
//! Tokens are translated one by one, without building a tree: subquery markers
//! become parentheses and connectives become `AND` / `OR`, so grouping in the
//! output is exactly the grouping written in the query.

use sea_query::{Alias, Asterisk, Expr, PostgresQueryBuilder, Query, SelectStatement, Value, Values};

use crate::config::Config;
use crate::token::{Token, TokenKind};

/// Comparison operator roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqualTo,
    GreaterThanEqualTo,
    Like,
    NotLike,
}

impl CompOp {
    pub fn sql(self) -> &'static str {
        match self {
            CompOp::Equal => "=",
            CompOp::NotEqual => "<>",
            CompOp::LessThan => "<",
            CompOp::GreaterThan => ">",
            CompOp::LessThanEqualTo => "<=",
            CompOp::GreaterThanEqualTo => ">=",
            CompOp::Like => "LIKE",
            CompOp::NotLike => "NOT LIKE",
        }
    }

    /// Convert the raw token text into the value bound on the right-hand side
    fn bind(self, raw: &str) -> Value {
        match self {
            CompOp::Like | CompOp::NotLike => Value::from(format!("%{}%", raw)),
            _ => match raw.parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::from(raw.to_string()),
            },
        }
    }
}

/// Boolean connective roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn sql(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("unknown comparator '{0}'")]
    UnknownComparator(String),

    #[error("unknown connective '{0}'")]
    UnknownConnective(String),

    #[error("value '{0}' is not preceded by a comparator")]
    ValueWithoutComparator(String),

    #[error("comparator '{0}' is not followed by a value")]
    MissingValue(String),

    #[error("field '{0}' is not followed by a comparator")]
    FieldWithoutComparator(String),

    #[error("no condition to render")]
    EmptyCondition,
}

/// A rendered condition: SQL text with `$1`, `$2`, ... placeholders plus the bound values
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Condition {
    fn push(&mut self, part: &str) {
        if !(self.sql.is_empty() || self.sql.ends_with('(') || part == ")") {
            self.sql.push(' ');
        }
        self.sql.push_str(part);
    }

    /// Bind a value and write its 1-based placeholder
    fn bind(&mut self, value: Value) {
        self.values.push(value);
        let placeholder = format!("${}", self.values.len());
        self.push(&placeholder);
    }
}

/// Renders tokens produced with a given configuration into SQL
pub struct SqlRenderer {
    comparators: Vec<(String, CompOp)>,
    connectives: Vec<(String, Connective)>,
}

impl SqlRenderer {
    pub fn new(config: &Config) -> Self {
        let c = &config.comparators;
        let comparators = vec![
            (c.equal.clone(), CompOp::Equal),
            (c.not_equal.clone(), CompOp::NotEqual),
            (c.less_than.clone(), CompOp::LessThan),
            (c.greater_than.clone(), CompOp::GreaterThan),
            (c.less_than_equal_to.clone(), CompOp::LessThanEqualTo),
            (c.greater_than_equal_to.clone(), CompOp::GreaterThanEqualTo),
            (c.like.clone(), CompOp::Like),
            (c.not_like.clone(), CompOp::NotLike),
        ];
        let connectives = vec![
            (config.connectives.and.clone(), Connective::And),
            (config.connectives.or.clone(), Connective::Or),
        ];

        Self {
            comparators,
            connectives,
        }
    }

    fn comparator(&self, symbol: &str) -> Result<CompOp, RenderError> {
        self.comparators
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, op)| *op)
            .ok_or_else(|| RenderError::UnknownComparator(symbol.to_string()))
    }

    fn connective(&self, symbol: &str) -> Result<Connective, RenderError> {
        self.connectives
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
            .map(|(_, c)| *c)
            .ok_or_else(|| RenderError::UnknownConnective(symbol.to_string()))
    }

    /// Render the tokens into a condition with numbered placeholders
    pub fn render_condition(&self, tokens: &[Token]) -> Result<Condition, RenderError> {
        let mut condition = Condition {
            sql: String::new(),
            values: Vec::new(),
        };
        // The comparator waiting for its value
        let mut pending: Option<(CompOp, &str)> = None;
        // The field waiting for its comparator
        let mut pending_field: Option<&str> = None;

        for token in tokens {
            if let Some(field) = pending_field.take() {
                if !token.is(TokenKind::Comparator) {
                    return Err(RenderError::FieldWithoutComparator(field.to_string()));
                }
            }
            if let Some((_, symbol)) = pending {
                if !token.is(TokenKind::Value) {
                    return Err(RenderError::MissingValue(symbol.to_string()));
                }
            }

            match token.kind {
                TokenKind::FieldName => {
                    condition.push(&quote_identifier(&token.value));
                    pending_field = Some(token.value.as_str());
                }
                TokenKind::Comparator => {
                    let op = self.comparator(&token.value)?;
                    condition.push(op.sql());
                    pending = Some((op, token.value.as_str()));
                }
                TokenKind::Value => {
                    let Some((op, _)) = pending.take() else {
                        return Err(RenderError::ValueWithoutComparator(token.value.clone()));
                    };
                    condition.bind(op.bind(&token.value));
                }
                TokenKind::Connective => {
                    let connective = self.connective(&token.value)?;
                    condition.push(connective.sql());
                }
                TokenKind::SubqueryStart => condition.push("("),
                TokenKind::SubqueryEnd => condition.push(")"),
                TokenKind::Empty | TokenKind::EndOfInput => {}
            }
        }

        if let Some(field) = pending_field {
            return Err(RenderError::FieldWithoutComparator(field.to_string()));
        }

        if let Some((_, symbol)) = pending {
            return Err(RenderError::MissingValue(symbol.to_string()));
        }

        if condition.sql.is_empty() {
            return Err(RenderError::EmptyCondition);
        }

        Ok(condition)
    }

    fn select(&self, table: &str, tokens: &[Token]) -> Result<SelectStatement, RenderError> {
        let condition = self.render_condition(tokens)?;

        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Alias::new(table))
            .and_where(Expr::cust_with_values(condition.sql, condition.values));

        Ok(select)
    }

    /// Render `SELECT * FROM table WHERE ...` with the values inlined
    pub fn render_select(&self, table: &str, tokens: &[Token]) -> Result<String, RenderError> {
        Ok(self.select(table, tokens)?.to_string(PostgresQueryBuilder))
    }

    /// Build `SELECT * FROM table WHERE ...` as a parameterized statement
    pub fn build_select(&self, table: &str, tokens: &[Token]) -> Result<(String, Values), RenderError> {
        Ok(self.select(table, tokens)?.build(PostgresQueryBuilder))
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
