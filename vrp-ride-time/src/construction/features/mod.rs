//! Provides extensions to build vrp variants as features.

use crate::construction::heuristics::*;
use crate::models::*;
use std::sync::Arc;

mod ride_time;
pub use self::ride_time::*;
