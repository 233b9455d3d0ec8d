//! Predicate builder.
//!
//! A [`Predicate`] is a conjunction of [`Clause`]s, each one a resolved
//! column compared to a literal. It is an explicit expression tree: building
//! one never touches the database, and [`IntoCondition`] lowers it into a
//! Sea-ORM [`Condition`] that any `Select` can filter on.
//!
//! ```rust,ignore
//! let predicate = build_predicate::<People>(&[
//!     QueryFilter::greater_than("age", 30),
//!     QueryFilter::like("name", "an"),
//! ])?;
//! let rows = person::Entity::find().filter(predicate).all(&db).await?;
//! ```

use sea_orm::{
    ColumnTrait, ColumnType, Condition, Value,
    sea_query::{Expr, Func, IntoCondition, LikeExpr, SimpleExpr},
};
use uuid::Uuid;

use crate::errors::FilterError;
use crate::filter::{FilterValue, Operation, QueryFilter};
use crate::traits::{ColumnOf, Resource, find_column};

/// One comparison against a resolved column.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause<C> {
    /// `column = value`, or `column IS NULL` for a null value.
    Equal { column: C, value: FilterValue },
    /// Case-insensitive `column LIKE '%pattern%'`. Wildcards in `pattern`
    /// match literally.
    Like { column: C, pattern: String },
    GreaterThan { column: C, value: FilterValue },
    LessThan { column: C, value: FilterValue },
}

/// How a column's values compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Numeric,
    Textual,
    Temporal,
    Uuid,
    Boolean,
    /// JSON, binary, arrays, enums and custom types.
    Other,
}

impl ColumnKind {
    fn of(column_type: &ColumnType) -> Self {
        match column_type {
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned
            | ColumnType::Float
            | ColumnType::Double
            | ColumnType::Decimal(_)
            | ColumnType::Money(_)
            | ColumnType::Year => Self::Numeric,
            ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text => Self::Textual,
            ColumnType::Date
            | ColumnType::Time
            | ColumnType::DateTime
            | ColumnType::Timestamp
            | ColumnType::TimestampWithTimeZone => Self::Temporal,
            ColumnType::Uuid => Self::Uuid,
            ColumnType::Boolean => Self::Boolean,
            _ => Self::Other,
        }
    }

    /// Whether `>` and `<` order this kind of column.
    const fn is_ordinal(self) -> bool {
        matches!(self, Self::Numeric | Self::Textual | Self::Temporal)
    }

    /// Coerce a non-null operand into the form this column stores, or
    /// `None` when the two cannot be compared. Temporal values are given
    /// as text.
    fn accept(self, value: &FilterValue) -> Option<FilterValue> {
        match (self, value) {
            (Self::Numeric, FilterValue::Int(_) | FilterValue::Float(_))
            | (Self::Textual | Self::Temporal, FilterValue::Text(_))
            | (Self::Uuid, FilterValue::Uuid(_))
            | (Self::Boolean, FilterValue::Bool(_)) => Some(value.clone()),
            (Self::Textual, FilterValue::Uuid(u)) => Some(FilterValue::Text(u.to_string())),
            (Self::Uuid, FilterValue::Text(s)) => Uuid::parse_str(s).ok().map(FilterValue::Uuid),
            (Self::Other, _) => Some(value.clone()),
            _ => None,
        }
    }
}

impl<C: ColumnTrait> Clause<C> {
    fn resolve(filter: &QueryFilter, column: Option<C>) -> Result<Self, FilterError> {
        let column = column.ok_or_else(|| FilterError::UnknownField {
            field: filter.field.clone(),
        })?;
        let kind = ColumnKind::of(column.def().get_column_type());
        let mismatch = || FilterError::TypeMismatch {
            field: filter.field.clone(),
            operation: filter.operation,
        };

        match filter.operation {
            Operation::Equal => {
                let value = if filter.value.is_null() {
                    FilterValue::Null
                } else {
                    kind.accept(&filter.value).ok_or_else(mismatch)?
                };
                Ok(Self::Equal { column, value })
            }
            Operation::Like => {
                if filter.value.is_null() {
                    return Err(FilterError::NullPattern {
                        field: filter.field.clone(),
                    });
                }
                if kind != ColumnKind::Textual {
                    return Err(mismatch());
                }
                Ok(Self::Like {
                    column,
                    pattern: filter.value.to_string(),
                })
            }
            Operation::GreaterThan | Operation::LessThan => {
                let value = filter
                    .value
                    .is_ordinal()
                    .then_some(kind)
                    .filter(|kind| kind.is_ordinal())
                    .and_then(|kind| kind.accept(&filter.value))
                    .ok_or_else(|| FilterError::NotOrdinal {
                        field: filter.field.clone(),
                        operation: filter.operation,
                    })?;
                Ok(if filter.operation == Operation::GreaterThan {
                    Self::GreaterThan { column, value }
                } else {
                    Self::LessThan { column, value }
                })
            }
        }
    }

    /// Lower into a Sea-ORM expression.
    #[must_use]
    pub fn into_expr(self) -> SimpleExpr {
        match self {
            Self::Equal {
                column,
                value: FilterValue::Null,
            } => column.is_null(),
            Self::Equal { column, value } => column.eq(Value::from(value)),
            Self::Like { column, pattern } => {
                let pattern = format!("%{}%", escape_like_wildcards(&pattern).to_ascii_uppercase());
                SimpleExpr::FunctionCall(Func::upper(Expr::col(column)))
                    .like(LikeExpr::new(pattern).escape('\\'))
            }
            Self::GreaterThan { column, value } => column.gt(Value::from(value)),
            Self::LessThan { column, value } => column.lt(Value::from(value)),
        }
    }
}

/// AND of clauses. The empty predicate matches every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate<C> {
    clauses: Vec<Clause<C>>,
}

impl<C> Default for Predicate<C> {
    fn default() -> Self {
        Self::all()
    }
}

impl<C> Predicate<C> {
    /// The predicate that matches everything.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    #[must_use]
    pub fn and(mut self, clause: Clause<C>) -> Self {
        self.clauses.push(clause);
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause<C>] {
        &self.clauses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<C: ColumnTrait> Predicate<C> {
    /// Resolve `filters` through `lookup`, keeping input order.
    ///
    /// # Errors
    ///
    /// Fails on the first filter that names an unknown column, compares a
    /// column with a value of another type, applies an ordering operator to
    /// a non-ordinal value or column, or uses `LIKE` with a null operand or
    /// on a non-text column.
    pub fn build_with(
        filters: &[QueryFilter],
        lookup: impl Fn(&str) -> Option<C>,
    ) -> Result<Self, FilterError> {
        let clauses = filters
            .iter()
            .map(|filter| Clause::resolve(filter, lookup(&filter.field)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(clauses = clauses.len(), "Built predicate");
        Ok(Self { clauses })
    }

    /// Resolve `filters` against an explicit named column list.
    ///
    /// # Errors
    ///
    /// See [`Predicate::build_with`].
    pub fn build(filters: &[QueryFilter], columns: &[(&str, C)]) -> Result<Self, FilterError> {
        Self::build_with(filters, |name| find_column(name, columns))
    }
}

impl<C: ColumnTrait> IntoCondition for Predicate<C> {
    fn into_condition(self) -> Condition {
        self.clauses
            .into_iter()
            .fold(Condition::all(), |condition, clause| condition.add(clause.into_expr()))
    }
}

/// Build a predicate for `R`, resolving fields through
/// [`Resource::filter_column`].
///
/// # Errors
///
/// See [`Predicate::build_with`].
pub fn build_predicate<R: Resource>(
    filters: &[QueryFilter],
) -> Result<Predicate<ColumnOf<R>>, FilterError> {
    Predicate::build_with(filters, R::filter_column)
}

/// Escape LIKE wildcards so the operand matches literally.
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
