/// Ports module defining interfaces for hexagonal architecture
///
/// Inbound ports are what the CLI drives (`BomMergePort`); outbound ports
/// are what the merge use case drives: document loading, list files,
/// serialization, schema validation, output and diagnostics.
pub mod inbound;
pub mod outbound;
