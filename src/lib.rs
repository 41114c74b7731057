//! TextMesh rich text conversion.
//!
//! Re-exports the [`textmesh`] parser and adds a file logger for tracing
//! parser decisions while debugging a conversion.

mod log_init;

pub use log_init::init_logger;
pub use textmesh::*;
