//! chartc-interchange: typed view of the statechart interchange JSON.
//!
//! Code generators and other consumers depend on this crate instead of
//! walking `serde_json::Value` trees themselves. [`from_interchange()`]
//! checks the bundle shape and that every name a construct references is
//! declared.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_interchange, InterchangeError};
pub use types::*;
