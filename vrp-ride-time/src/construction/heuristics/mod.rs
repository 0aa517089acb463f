//! Contains insertion contexts and helpers to evaluate insertions of activities into routes.

mod context;
pub use self::context::*;

mod evaluators;
pub use self::evaluators::*;
