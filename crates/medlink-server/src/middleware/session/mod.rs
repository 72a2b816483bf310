//! Session gate: path classification plus coarse session presence.

pub mod gate;
pub mod layer;

pub use gate::{canonical_path, requested_next, same_site_next, GateAction, PathClass, SessionGate};
pub use layer::{SessionGateLayer, SessionGateMiddleware};
