//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod base_aggregate;
pub mod document_line;
pub mod entity_metadata;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use base_aggregate::BaseAggregate;
pub use document_line::{
    document_total, is_countable, parse_decimal, validate_lines, DocumentLine,
    LineValidationError,
};
pub use entity_metadata::EntityMetadata;
