//! Decides which posts are hidden from the current user.

use crate::model::{Post, User};

/// True when `post` must not appear in `current_user`'s post list.
///
/// A post is hidden when either holds:
/// - the user deleted it themselves;
/// - it is a join/leave notification, the user hides those, and it is not
///   about the user's own membership change.
#[must_use]
pub fn is_excluded(post: &Post, current_user: &User, show_join_leave: bool) -> bool {
    let self_deleted = post.is_deleted() && post.user_id == current_user.id;
    self_deleted || should_filter_join_leave(post, show_join_leave, &current_user.username)
}

/// True when a join/leave notification should be dropped under the
/// current display preference.
///
/// Notifications naming `current_username` (as the actor, the added user or
/// the removed user) are always kept.
#[must_use]
pub fn should_filter_join_leave(post: &Post, show_join_leave: bool, current_username: &str) -> bool {
    if show_join_leave || !post.post_type.is_join_leave() {
        return false;
    }
    !post.props.mentions_username(current_username)
}
