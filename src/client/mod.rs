//! Client side cursor over `GET /api/users`.

mod controller;
mod cursor;
mod fetcher;

pub use controller::{CursorSnapshot, LeaderboardCursor};
pub use cursor::{CursorParams, CursorState, FetchMode, FetchRequest, DEFAULT_PAGE_SIZE};
pub use fetcher::{ClientError, HttpUsersFetcher, UsersFetcher};
