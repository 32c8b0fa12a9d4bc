//! PostgREST query builder
//!
//! Builds the `?select=*&col=eq.value&order=col.desc&limit=n` query string
//! and the matching realtime filter expression.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;

/// Characters left as-is in filter values (PostgREST reads them verbatim).
const VALUE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
        }
    }
}

/// A single column comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: Op,
    pub value: String,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: Op, value: impl fmt::Display) -> Self {
        Self { column: column.into(), op, value: value.to_string() }
    }

    pub fn eq(column: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::new(column, Op::Eq, value)
    }

    /// `col=op.value`, value percent-encoded
    pub fn to_param(&self) -> String {
        format!(
            "{}={}.{}",
            self.column,
            self.op.as_str(),
            utf8_percent_encode(&self.value, VALUE_SET)
        )
    }

    /// Realtime `postgres_changes` filter syntax (not encoded)
    pub fn to_realtime(&self) -> String {
        format!("{}={}.{}", self.column, self.op.as_str(), self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Select query: filters, optional order, optional limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn order(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order { column: column.into(), ascending });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = vec!["select=*".to_string()];
        parts.extend(self.filters.iter().map(Filter::to_param));
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            parts.push(format!("order={}.{}", order.column, dir));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        parts.join("&")
    }
}

/// Encode filters alone (for PATCH/DELETE targets).
pub(crate) fn filters_to_query(filters: &[Filter]) -> String {
    filters.iter().map(Filter::to_param).collect::<Vec<_>>().join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_select() {
        assert_eq!(Query::new().to_query_string(), "select=*");
    }

    #[test]
    fn test_filter_order_limit() {
        let q = Query::new()
            .eq("activity_date", "2026-10-19")
            .order("activity_time", true)
            .limit(10);
        assert_eq!(
            q.to_query_string(),
            "select=*&activity_date=eq.2026-10-19&order=activity_time.asc&limit=10"
        );
    }

    #[test]
    fn test_values_are_encoded() {
        let f = Filter::eq("subject", "Contact Form: Ava & co");
        assert_eq!(f.to_param(), "subject=eq.Contact%20Form:%20Ava%20%26%20co");
        assert_eq!(f.to_realtime(), "subject=eq.Contact Form: Ava & co");
    }

    #[test]
    fn test_descending_order() {
        let q = Query::new().order("created_at", false);
        assert_eq!(q.to_query_string(), "select=*&order=created_at.desc");
    }

    #[test]
    fn test_filters_to_query() {
        let filters = [Filter::eq("id", "a1"), Filter::new("duration", Op::Gte, 5)];
        assert_eq!(filters_to_query(&filters), "id=eq.a1&duration=gte.5");
    }
}
