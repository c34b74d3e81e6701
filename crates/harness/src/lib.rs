// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Instrumentation for exercising skipmap containers.
//!
//! Nothing in here is needed to use the maps. The pieces are:
//!
//! - `clock`: a `Clock` trait with a wall-time and a hand-driven
//!   implementation, plus batch timing
//! - `workload`: seeded key and operation streams
//! - `compare`: content comparison between any two ordered sequences
//! - `driver`: replays an operation stream against a map and a `BTreeMap`
//!   model, reporting the first divergence

pub mod clock;
pub mod compare;
pub mod driver;
pub mod workload;

pub use clock::{Clock, ManualClock, MonotonicClock, time_batch};
pub use compare::{Mismatch, same_contents};
pub use driver::{Report, run_indexed, run_multi, run_unique};
pub use workload::{Mix, Op, Workload};
