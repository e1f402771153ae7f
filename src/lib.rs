//! Marshtown: dialogue playback and neural-network puzzle logic.
//!
//! Dialogue scripts are read per language into tagged lines and handed
//! out through a single cursor; puzzle networks decide whether their
//! neurons have reached a completion condition.

pub mod core;
pub mod schema;
