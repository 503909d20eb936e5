mod identity_policy;
mod validation_gate;

pub use identity_policy::{IdentityIndex, IdentityPolicy};
pub use validation_gate::{GateDecision, ValidationGate};
