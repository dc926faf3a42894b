//! # Sprig - Filter Expressions
//!
//! This module defines the filter expression model: an immutable boolean
//! tree over object properties, IDs and cross-references that compiles into
//! the `where` argument of a GraphQL `Get` query.
//!
//! ## Architecture Overview
//!
//! The filter module is organized into focused submodules:
//!
//! - **[operators]** - The comparison and composition operator vocabulary
//! - **[value]** - Typed comparison literals and their wire keys
//! - **[expression]** - The expression tree (leaf, reference, composite)
//! - **[builder]** - Fluent entry points that freeze into expressions
//!
//! ## Quick Start
//!
//! ```
//! use sprig::filter::Filter;
//!
//! let expr = Filter::all_of(vec![
//!     Filter::by_property("status").equal("active"),
//!     Filter::by_property("wordCount").greater_than(1000),
//! ]);
//! ```
//!
//! This matches objects whose `status` is `"active"` and whose `wordCount`
//! exceeds 1000.
//!
//! ## Core Concepts
//!
//! ### Three Node Shapes
//!
//! Every filter is one of exactly three shapes:
//!
//! - **Leaf** - a single comparison against a property or the object ID
//! - **Reference** - a comparison carried across a reference property
//! - **Composite** - `And`/`Or` over a list of sub-filters
//!
//! ### Frozen Builders
//!
//! Builder entry points (`Filter::by_property`, `Filter::by_id`,
//! `Filter::by_ref`) return small intermediate builders whose terminal
//! methods (`equal`, `like`, `greater_than`, ...) consume the builder and
//! return a finished [`FilterExpr`]. Expressions are plain values: cloning,
//! nesting and reusing them never shares mutable state.
//!
//! ### Typed Literals
//!
//! Comparison literals are typed at construction ([`FilterValue`]), and the
//! literal's type decides the wire key (`valueText`, `valueInt`,
//! `valueNumber`, `valueBoolean`, `valueDate`). There is no runtime
//! inspection of untyped values inside the tree.
//!
//! ## Examples
//!
//! ### Property Comparison
//!
//! ```
//! use sprig::filter::Filter;
//!
//! let expr = Filter::by_property("title").like("*rust*");
//! ```
//!
//! ### Filtering Across a Reference
//!
//! ```
//! use sprig::filter::Filter;
//!
//! let expr = Filter::by_ref("hasCategory").by_property("title").like("*Tech*");
//! ```
//!
//! ### Nested Composition
//!
//! ```
//! use sprig::filter::Filter;
//!
//! let expr = Filter::any_of(vec![
//!     Filter::by_property("draft").equal(true),
//!     Filter::all_of(vec![
//!         Filter::by_property("views").less_than(10),
//!         Filter::by_id().not_equal("00000000-0000-0000-0000-000000000000"),
//!     ]),
//! ]);
//! ```
pub mod builder;
pub mod expression;
pub mod operators;
pub mod value;

pub use builder::{Filter, IdFilter, PropertyFilter, ReferenceFilter, ReferenceProperty};
pub use expression::{Comparison, FilterExpr};
pub use operators::Operator;
pub use value::FilterValue;
