pub mod counters;
pub mod sessions;
