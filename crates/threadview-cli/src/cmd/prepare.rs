//! `threadview prepare`: build the display list for a post dump.
//!
//! Posts are read as a newest-first JSON array, the way the upstream store
//! hands them to a post view.

use crate::output::{OutputMode, render_list};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use threadview_core::config::resolve_config;
use threadview_core::selector::PostListArgs;
use threadview_core::{Post, User};

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// JSON file holding a newest-first array of posts, or `-` for stdin.
    pub posts: PathBuf,

    /// Id of the user the list is prepared for.
    #[arg(long)]
    pub user_id: String,

    /// Username of the user the list is prepared for.
    #[arg(long)]
    pub username: String,

    /// Epoch millis of the user's last visit; later posts by others are new.
    #[arg(long)]
    pub last_viewed_at: Option<i64>,

    /// Never insert the new-messages line.
    #[arg(long)]
    pub no_indicate: bool,

    /// Hide join/leave notifications not about the current user.
    #[arg(long, conflicts_with = "show_join_leave")]
    pub hide_join_leave: bool,

    /// Show join/leave notifications regardless of config.
    #[arg(long)]
    pub show_join_leave: bool,

    /// Config file (defaults to the user config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read posts from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("Failed to parse posts in {}", path.display()))
}

pub fn run_prepare(args: &PrepareArgs, output: OutputMode) -> Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let mut selector = config.selector().context("Invalid clock configuration")?;

    let posts = read_posts(&args.posts)?;
    tracing::info!(posts = posts.len(), user = %args.username, "preparing post list");

    let show_join_leave = if args.hide_join_leave {
        false
    } else {
        args.show_join_leave || config.display.show_join_leave
    };

    let mut list_args = PostListArgs::new(
        posts,
        Some(Arc::new(User::new(&args.user_id, &args.username))),
    );
    list_args.last_viewed_at = args.last_viewed_at;
    list_args.indicate_new_messages = config.display.indicate_new_messages && !args.no_indicate;
    list_args.show_join_leave = show_join_leave;

    let items = selector.select(&list_args);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_list(&mut out, &items, output)?;
    Ok(())
}
