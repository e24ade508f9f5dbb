//! Human-readable renderings of evaluated graphs.
pub mod trace;

pub use trace::format_trace;
