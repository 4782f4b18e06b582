pub mod os;
pub mod probe;

pub use os::Os;
pub use probe::{Probe, SystemProbe};
