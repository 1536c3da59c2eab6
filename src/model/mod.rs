mod queries;
mod response_utils;
mod stats;
mod user;

pub use queries::*;
pub use response_utils::*;
pub use stats::*;
pub use user::*;
