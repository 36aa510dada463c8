//! Serialization module
//!
//! Every entity already implements `Serialize`; the serializers here add
//! formatting options for documents, pages and run results.

pub mod json;
pub mod yaml;

pub use json::{JsonOptions, JsonSerializer};
pub use yaml::{YamlOptions, YamlSerializer};
