pub mod counters_sea;
pub mod sessions_sea;
