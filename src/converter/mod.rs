//! Converters from rule provider documents to line-oriented rule files.

mod classical;
mod provider;

pub use classical::{convert_provider, to_classical, ConvertMode};
pub use provider::{
    output_path, transform_domain_rules, transform_ip_rules, transform_rules, ProviderDocument,
    TransformSummary, LIST_EXTENSION,
};
