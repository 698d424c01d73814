//! Fixed-shape post and user records as read from upstream state.

pub mod post;
pub mod user;

pub use post::{Post, PostProps, PostState, PostType};
pub use user::User;
