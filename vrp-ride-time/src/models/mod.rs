//! A collection of models to represent problem and solution in Vehicle Routing Problem domain
//! as much as it is needed to evaluate ride time of shipments.

mod goal;
pub use self::goal::*;

pub mod common;
pub mod problem;
pub mod solution;
