//! The construction module contains the building blocks used by insertion heuristics: insertion
//! contexts and features which evaluate feasibility of insertions.

pub mod features;
pub mod heuristics;
