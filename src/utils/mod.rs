// Small numeric and calendar helpers shared by the generator and analysis code
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::TimeUtils;
