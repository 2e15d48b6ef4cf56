//! Repository traits and SQLite implementations

pub mod thumbnail;
pub mod video;

pub use thumbnail::{SqliteThumbnailRepository, ThumbnailRepository};
pub use video::{SqliteVideoRepository, VideoRepository};
