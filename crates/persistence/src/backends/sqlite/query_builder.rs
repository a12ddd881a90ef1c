//! SQL construction for listing searches.
//!
//! Translates a [`ListingPredicate`] into a parameterized `WHERE` clause over
//! the `listings` table (aliased `l`) and a [`ListingSort`] into an
//! `ORDER BY`. User input only ever reaches SQLite as bound parameters; sort
//! columns come from a fixed allow-list.
//!
//! Text terms compare through [`UNICODE_LOWER`], since SQLite's own `LIKE`
//! only folds ASCII letters.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use crate::types::{ListingPredicate, ListingSort, SortDirection, SortField};

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone, Default)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
    /// Float parameter.
    Float(f64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Boxes the value for binding.
    pub fn to_sql_box(&self) -> Box<dyn rusqlite::ToSql> {
        match self {
            SqlParam::String(s) => Box::new(s.clone()),
            SqlParam::Integer(i) => Box::new(*i),
            SqlParam::Float(f) => Box::new(*f),
        }
    }
}

impl SqlFragment {
    /// Adds a parameter placeholder and returns the placeholder string.
    pub fn add_param(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("?{}", self.params.len())
    }

    /// Appends a condition, joined with AND.
    pub fn and(&mut self, condition: &str) {
        if self.sql.is_empty() {
            self.sql = condition.to_string();
        } else {
            self.sql = format!("{} AND {}", self.sql, condition);
        }
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Boxes every parameter for binding.
    pub fn bindings(&self) -> Vec<Box<dyn rusqlite::ToSql>> {
        self.params.iter().map(SqlParam::to_sql_box).collect()
    }
}

/// Name of the Unicode-aware lowercase SQL function.
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Registers [`UNICODE_LOWER`] on a connection. `NULL` maps to `NULL`.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|v| v.to_lowercase())),
    )
}

/// Builds the `WHERE` clause for a predicate. Empty when unconstrained.
pub fn where_clause(predicate: &ListingPredicate) -> SqlFragment {
    let mut fragment = SqlFragment::default();

    if let Some(search) = &predicate.search {
        let p = fragment.add_param(SqlParam::string(escape_like(&search.to_lowercase())));
        fragment.and(&format!(
            "({} OR {})",
            like("l.address", &p),
            like("l.description", &p)
        ));
    }
    if let Some(city) = &predicate.city {
        let p = fragment.add_param(SqlParam::string(escape_like(&city.to_lowercase())));
        fragment.and(&like("l.city", &p));
    }
    if let Some(province) = &predicate.province {
        let p = fragment.add_param(SqlParam::string(escape_like(&province.to_lowercase())));
        fragment.and(&like("l.province", &p));
    }
    if let Some(property_type) = predicate.property_type {
        let p = fragment.add_param(SqlParam::string(property_type.as_str()));
        fragment.and(&format!("l.property_type = {p}"));
    }
    if let Some(operation_type) = predicate.operation_type {
        let p = fragment.add_param(SqlParam::string(operation_type.as_str()));
        fragment.and(&format!("l.operation_type = {p}"));
    }
    if let Some(status) = predicate.status {
        let p = fragment.add_param(SqlParam::string(status.as_str()));
        fragment.and(&format!("l.status = {p}"));
    }
    if let Some(min) = predicate.price.min.as_ref().and_then(price_param) {
        let p = fragment.add_param(min);
        fragment.and(&format!("l.price >= {p}"));
    }
    if let Some(max) = predicate.price.max.as_ref().and_then(price_param) {
        let p = fragment.add_param(max);
        fragment.and(&format!("l.price <= {p}"));
    }
    if let Some(min_bedrooms) = predicate.min_bedrooms {
        let p = fragment.add_param(SqlParam::integer(min_bedrooms));
        fragment.and(&format!("l.bedrooms >= {p}"));
    }
    if let Some(pool) = predicate.pool {
        let p = fragment.add_param(SqlParam::integer(i64::from(pool)));
        fragment.and(&format!("l.pool = {p}"));
    }

    fragment
}

/// Builds the `ORDER BY` clause (without the keyword).
pub fn order_by(sort: ListingSort) -> String {
    let column = match sort.field {
        SortField::Price => "l.price",
        SortField::AreaSqm => "l.area_sqm",
        SortField::Bedrooms => "l.bedrooms",
        SortField::CreatedAt => "l.created_at",
    };
    let direction = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    format!("{column} {direction}, l.id {direction}")
}

fn like(column: &str, placeholder: &str) -> String {
    format!("{UNICODE_LOWER}({column}) LIKE '%' || {placeholder} || '%' ESCAPE '\\'")
}

fn price_param(price: &Decimal) -> Option<SqlParam> {
    price.to_f64().map(SqlParam::Float)
}

/// Escapes LIKE wildcards so user text matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
