/// BOM merge domain - document model, merge services and policies
///
/// Everything in this module is pure: no I/O, no clocks except the
/// normalizer's timestamp, and no shared state between calls.
pub mod domain;
pub mod policies;
pub mod services;
