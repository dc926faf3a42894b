use crate::filter::expression::{Comparison, FilterExpr};
use crate::filter::operators::Operator;
use crate::filter::value::FilterValue;

/// Entry points for building filter expressions.
///
/// Each entry point returns a small builder scoped to its target; the
/// builder's terminal method consumes it and returns a frozen
/// [`FilterExpr`]. There are no error paths anywhere in this family:
/// every combination of inputs produces an expression, and semantic
/// validity is the server's concern.
///
/// # Examples
///
/// ```
/// use sprig::filter::Filter;
///
/// let by_status = Filter::by_property("status").equal("published");
/// let recent = Filter::by_property("wordCount").greater_than(1000);
/// let either = Filter::any_of(vec![by_status, recent]);
/// ```
pub struct Filter;

impl Filter {
    /// Starts a comparison against a named property.
    pub fn by_property(name: impl Into<String>) -> PropertyFilter {
        PropertyFilter { field: name.into() }
    }

    /// Starts a comparison against the object ID.
    pub fn by_id() -> IdFilter {
        IdFilter
    }

    /// Starts a comparison carried across a reference property.
    pub fn by_ref(relation: impl Into<String>) -> ReferenceFilter {
        ReferenceFilter {
            relation: relation.into(),
        }
    }

    /// Conjunction over the given sub-filters, in order.
    pub fn all_of(operands: Vec<FilterExpr>) -> FilterExpr {
        FilterExpr::Composite {
            operator: Operator::And,
            operands,
        }
    }

    /// Disjunction over the given sub-filters, in order.
    pub fn any_of(operands: Vec<FilterExpr>) -> FilterExpr {
        FilterExpr::Composite {
            operator: Operator::Or,
            operands,
        }
    }
}

/// Comparison builder scoped to one property.
pub struct PropertyFilter {
    field: String,
}

impl PropertyFilter {
    pub fn equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::Equal, value.into())
    }

    pub fn not_equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::NotEqual, value.into())
    }

    /// Wildcard match; `*` matches any run of characters, `?` one character.
    pub fn like(self, pattern: impl Into<String>) -> FilterExpr {
        self.finish(Operator::Like, FilterValue::Text(pattern.into()))
    }

    /// Matches objects where the property is null (`true`) or set (`false`).
    pub fn is_null(self, value: bool) -> FilterExpr {
        self.finish(Operator::IsNull, FilterValue::Boolean(value))
    }

    pub fn greater_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::GreaterThan, value.into())
    }

    pub fn less_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::LessThan, value.into())
    }

    /// Matches objects whose property equals any of the given values.
    /// Input order is preserved, duplicates included.
    pub fn contains_any<I, S>(self, values: I) -> FilterExpr
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.finish(Operator::ContainsAny, FilterValue::TextList(items))
    }

    fn finish(self, operator: Operator, value: FilterValue) -> FilterExpr {
        FilterExpr::Comparison(Comparison::new(self.field, operator, value))
    }
}

/// Comparison builder scoped to the object ID.
///
/// IDs compare under the fixed field name `id`. Pattern matching is not
/// offered; every other comparison is.
pub struct IdFilter;

impl IdFilter {
    pub fn equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::Equal, value.into())
    }

    pub fn not_equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::NotEqual, value.into())
    }

    pub fn is_null(self, value: bool) -> FilterExpr {
        self.finish(Operator::IsNull, FilterValue::Boolean(value))
    }

    pub fn greater_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::GreaterThan, value.into())
    }

    pub fn less_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::LessThan, value.into())
    }

    pub fn contains_any<I, S>(self, values: I) -> FilterExpr
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.finish(Operator::ContainsAny, FilterValue::TextList(items))
    }

    fn finish(self, operator: Operator, value: FilterValue) -> FilterExpr {
        FilterExpr::Comparison(Comparison::new("id", operator, value))
    }
}

/// Builder for a comparison carried across a reference property.
///
/// Converting the builder without picking an inner target yields a
/// reference record with an empty `valueObject`.
///
/// # Examples
///
/// ```
/// use sprig::filter::Filter;
///
/// let expr = Filter::by_ref("hasCategory").by_property("title").like("*Tech*");
/// ```
pub struct ReferenceFilter {
    relation: String,
}

impl ReferenceFilter {
    /// Targets a property of the referenced object.
    pub fn by_property(self, name: impl Into<String>) -> ReferenceProperty {
        ReferenceProperty {
            relation: self.relation,
            field: name.into(),
        }
    }

    /// Targets the referenced object's ID.
    pub fn by_id(self) -> ReferenceProperty {
        ReferenceProperty {
            relation: self.relation,
            field: "id".to_string(),
        }
    }
}

impl From<ReferenceFilter> for FilterExpr {
    fn from(builder: ReferenceFilter) -> Self {
        FilterExpr::Reference {
            relation: builder.relation,
            inner: None,
        }
    }
}

/// Comparison builder scoped to one property of a referenced object.
pub struct ReferenceProperty {
    relation: String,
    field: String,
}

impl ReferenceProperty {
    pub fn equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::Equal, value.into())
    }

    pub fn not_equal(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::NotEqual, value.into())
    }

    pub fn like(self, pattern: impl Into<String>) -> FilterExpr {
        self.finish(Operator::Like, FilterValue::Text(pattern.into()))
    }

    pub fn is_null(self, value: bool) -> FilterExpr {
        self.finish(Operator::IsNull, FilterValue::Boolean(value))
    }

    pub fn greater_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::GreaterThan, value.into())
    }

    pub fn less_than(self, value: impl Into<FilterValue>) -> FilterExpr {
        self.finish(Operator::LessThan, value.into())
    }

    pub fn contains_any<I, S>(self, values: I) -> FilterExpr
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.finish(Operator::ContainsAny, FilterValue::TextList(items))
    }

    fn finish(self, operator: Operator, value: FilterValue) -> FilterExpr {
        FilterExpr::Reference {
            relation: self.relation,
            inner: Some(Comparison::new(self.field, operator, value)),
        }
    }
}
