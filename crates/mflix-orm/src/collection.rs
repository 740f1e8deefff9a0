//! Collection names in the mflix database.

pub const MOVIES: &str = "movies";
pub const COMMENTS: &str = "comments";
