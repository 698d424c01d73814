#![forbid(unsafe_code)]
//! threadview-core library.
//!
//! Turns a newest-first collection of channel or thread posts into the
//! ordered list a post view renders: post ids interleaved with day
//! separators, a "start of new messages" line and a deleted-root notice.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` types for parse failures, `anyhow::Result` for
//!   config loading. The list pipeline itself is infallible.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).
//!
//! # Module layout
//!
//! - [`model`]: [`Post`], [`User`] and their closed enums.
//! - [`filter`]: which posts are hidden from the current user.
//! - [`day`]: calendar-day bucketing for day separators.
//! - [`token`]: [`PostListItem`] and its string wire form.
//! - [`assemble`]: the single ordered pass that builds the list.
//! - [`selector`]: per-consumer memoization around [`assemble`].
//! - [`config`]: TOML display/clock settings.

pub mod assemble;
pub mod config;
pub mod day;
pub mod error;
pub mod filter;
pub mod model;
pub mod selector;
pub mod token;

pub use assemble::{PostListInput, prepare_post_list};
pub use day::DayClock;
pub use error::ParseEnumError;
pub use model::{Post, PostProps, PostState, PostType, User};
pub use selector::{PostListArgs, PostListSelector, make_prepare_post_list};
pub use token::PostListItem;
