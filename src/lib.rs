pub mod aggregate;
pub mod client;
pub mod connection;
pub mod data;
pub mod filter;
pub mod graphql;
pub mod query;
pub mod response;
pub mod schema;
pub mod tenants;

#[cfg(feature = "cli")]
pub mod cli;

pub use aggregate::{AggregateBuilder, AggregateSpec};
pub use client::{Client, ClientBuilder, Collection};
pub use connection::{Connection, ConnectionConfig, ConnectionError, HttpConnection};
pub use data::DataOperations;
pub use filter::{Comparison, Filter, FilterExpr, FilterValue, Operator};
pub use graphql::{filter_literal, string_literal};
pub use query::{QueryBuilder, QuerySpec};
pub use response::{GraphQLError, QueryError};
pub use schema::{Collections, SchemaError};
pub use tenants::{Tenant, TenantOperations, TenantStatus};
