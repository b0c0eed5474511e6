//! Purpose: Core library for the Keelstone host-runtime bridge.
//! Exports: value marshalling, the dispatch surface, and the engine seam.
//! Role: Host-agnostic half of the bridge; addons supply the engine client
//! and the host-value lift/lower for their runtime.
//! Invariants: No storage logic lives here; the engine is reached only
//! through the `engine` traits.
//! Invariants: The dispatch table is the complete host-visible surface.

pub mod bridge;
pub mod convert;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod registry;
pub mod value;

pub use bridge::Bridge;
pub use error::{Error, ErrorKind, from_abi_code, to_abi_code};
pub use value::Value;
