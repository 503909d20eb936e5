/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// the CycloneDX codec, the schema validator, filesystem access and the
/// console. The CLI in `main.rs` is the only inbound adapter.
pub mod outbound;
