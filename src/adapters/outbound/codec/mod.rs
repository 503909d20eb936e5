//! CycloneDX JSON encoding and decoding

mod cyclonedx_json_codec;

pub use cyclonedx_json_codec::CycloneDxJsonCodec;
