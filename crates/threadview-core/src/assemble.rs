//! Single ordered pass that turns posts into a display list.
//!
//! Posts arrive newest-first. Day separators and the unread boundary can only
//! be placed correctly while walking oldest to newest (they mark the *first*
//! post of a day, the *first* unread post), so the pass runs in ascending
//! order and the result is flipped back to newest-first at the end.

use chrono::NaiveDate;

use crate::day::DayClock;
use crate::filter::is_excluded;
use crate::model::{Post, User};
use crate::token::PostListItem;

/// Everything one list preparation depends on.
#[derive(Debug, Clone, Copy)]
pub struct PostListInput<'a> {
    /// Posts ordered newest-first.
    pub posts: &'a [Post],
    /// Epoch millis after which posts count as unread, if known.
    pub last_viewed_at: Option<i64>,
    pub indicate_new_messages: bool,
    pub current_user: Option<&'a User>,
    pub show_join_leave: bool,
}

/// Running state of the ascending pass.
///
/// Each marker kind is emitted at most once per day (date lines) or at most
/// once per list (root notice, unread boundary).
struct MarkerInserter<'a> {
    clock: DayClock,
    current_user: &'a User,
    unread_after: Option<i64>,
    root_missing: bool,
    last_day: Option<NaiveDate>,
    added_deleted_root: bool,
    added_new_messages: bool,
    out: Vec<PostListItem>,
}

impl<'a> MarkerInserter<'a> {
    fn new(input: &PostListInput<'a>, current_user: &'a User, clock: DayClock) -> Self {
        Self {
            clock,
            current_user,
            unread_after: input
                .last_viewed_at
                .filter(|_| input.indicate_new_messages),
            root_missing: root_is_missing(input.posts),
            last_day: None,
            added_deleted_root: false,
            added_new_messages: false,
            out: Vec::with_capacity(input.posts.len() + 4),
        }
    }

    fn push(&mut self, post: &Post) {
        let day = self.clock.day_of(post.create_at);
        if self.last_day != Some(day) {
            self.out.push(PostListItem::DateLine(day));
            self.last_day = Some(day);
        }

        if self.root_missing && !self.added_deleted_root {
            self.out.push(PostListItem::DeletedRootPost);
            self.added_deleted_root = true;
        }

        if !self.added_new_messages && self.is_unread(post) {
            self.out.push(PostListItem::StartOfNewMessages);
            self.added_new_messages = true;
        }

        self.out.push(PostListItem::Post(post.id.clone()));
    }

    fn is_unread(&self, post: &Post) -> bool {
        self.unread_after
            .is_some_and(|last_viewed_at| post.create_at > last_viewed_at)
            && post.user_id != self.current_user.id
    }

    /// Flip the ascending list back to newest-first.
    fn finish(mut self) -> Vec<PostListItem> {
        self.out.reverse();
        self.out
    }
}

/// True when the thread root named by the oldest post is not among `posts`.
///
/// Checked against the whole unfiltered collection so hiding a post never
/// makes its root look deleted. An oldest post without a root id is itself a
/// root.
fn root_is_missing(posts: &[Post]) -> bool {
    let Some(root_id) = posts.last().and_then(|oldest| oldest.root_id.as_deref()) else {
        return false;
    };
    !posts.iter().any(|post| post.id == root_id)
}

/// Build the newest-first display list for `input`.
///
/// Returns an empty list when there are no posts or no current user.
#[must_use]
pub fn prepare_post_list(input: &PostListInput<'_>, clock: DayClock) -> Vec<PostListItem> {
    let Some(current_user) = input.current_user else {
        return Vec::new();
    };
    if input.posts.is_empty() {
        return Vec::new();
    }

    let mut inserter = MarkerInserter::new(input, current_user, clock);
    let mut filtered = 0usize;
    for post in input.posts.iter().rev() {
        if is_excluded(post, current_user, input.show_join_leave) {
            filtered += 1;
            continue;
        }
        inserter.push(post);
    }

    let items = inserter.finish();
    tracing::trace!(
        posts = input.posts.len(),
        filtered,
        markers = items.iter().filter(|item| item.is_marker()).count(),
        "prepared post list"
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PostProps, PostState, PostType};

    const DAY1: i64 = 1_709_251_200_000; // 2024-03-01T00:00:00Z
    const DAY2: i64 = DAY1 + 86_400_000;

    fn user_a() -> User {
        User::new("a", "alice")
    }

    fn input<'a>(posts: &'a [Post], user: Option<&'a User>) -> PostListInput<'a> {
        PostListInput {
            posts,
            last_viewed_at: None,
            indicate_new_messages: true,
            current_user: user,
            show_join_leave: true,
        }
    }

    fn render(items: &[PostListItem]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn thread_with_missing_root_and_unread_reply() {
        let posts = vec![
            Post::new("p3", "a", DAY2 + 1200),
            Post::new("p2", "b", DAY2 + 1100),
            Post::new("p1", "a", DAY1 + 1000).with_root("missing"),
        ];
        let user = user_a();
        let mut req = input(&posts, Some(&user));
        req.last_viewed_at = Some(DAY1 + 1050);

        let out = prepare_post_list(&req, DayClock::utc());
        assert_eq!(
            render(&out),
            [
                "p3",
                "p2",
                "start-of-new-messages",
                "date-2024-03-02",
                "p1",
                "deleted-root-post",
                "date-2024-03-01",
            ]
        );
    }

    #[test]
    fn empty_posts_or_missing_user_yield_empty_list() {
        let user = user_a();
        assert!(prepare_post_list(&input(&[], Some(&user)), DayClock::utc()).is_empty());

        let posts = vec![Post::new("p1", "a", DAY1)];
        assert!(prepare_post_list(&input(&posts, None), DayClock::utc()).is_empty());
    }

    #[test]
    fn same_day_posts_share_one_date_line() {
        let posts = vec![
            Post::new("p3", "b", DAY1 + 30),
            Post::new("p2", "b", DAY1 + 20),
            Post::new("p1", "b", DAY1 + 10),
        ];
        let user = user_a();
        let out = prepare_post_list(&input(&posts, Some(&user)), DayClock::utc());
        assert_eq!(render(&out), ["p3", "p2", "p1", "date-2024-03-01"]);
    }

    #[test]
    fn present_root_emits_no_notice() {
        let posts = vec![
            Post::new("reply", "b", DAY1 + 20).with_root("root"),
            Post::new("root", "b", DAY1 + 10),
        ];
        let user = user_a();
        let out = prepare_post_list(&input(&posts, Some(&user)), DayClock::utc());
        assert!(!out.contains(&PostListItem::DeletedRootPost));
    }

    #[test]
    fn hidden_root_post_is_not_reported_missing() {
        // The root is the user's own deleted post: hidden, but still present.
        let posts = vec![
            Post::new("reply", "b", DAY1 + 20).with_root("root"),
            Post::new("root", "a", DAY1 + 10).with_state(PostState::Deleted),
        ];
        let user = user_a();
        let out = prepare_post_list(&input(&posts, Some(&user)), DayClock::utc());
        assert_eq!(render(&out), ["reply", "date-2024-03-01"]);
    }

    #[test]
    fn root_lookup_uses_unfiltered_ids() {
        let posts = vec![
            Post::new("root", "a", DAY1 + 20).with_state(PostState::Deleted),
            Post::new("reply", "b", DAY1 + 10).with_root("root"),
        ];
        assert!(!root_is_missing(&posts));
        assert!(root_is_missing(&posts[1..]));
        assert!(!root_is_missing(&[]));
    }

    #[test]
    fn missing_root_notice_follows_first_visible_date_line() {
        let posts = vec![
            Post::new("p2", "b", DAY2).with_root("gone"),
            Post::new("p1", "a", DAY1)
                .with_root("gone")
                .with_state(PostState::Deleted),
        ];
        let user = user_a();
        let out = prepare_post_list(&input(&posts, Some(&user)), DayClock::utc());
        assert_eq!(render(&out), ["p2", "deleted-root-post", "date-2024-03-02"]);
    }

    #[test]
    fn unread_boundary_requires_timestamp_and_flag() {
        let posts = vec![Post::new("p2", "b", DAY1 + 20), Post::new("p1", "b", DAY1 + 10)];
        let user = user_a();

        let mut req = input(&posts, Some(&user));
        let out = prepare_post_list(&req, DayClock::utc());
        assert!(!out.contains(&PostListItem::StartOfNewMessages));

        req.last_viewed_at = Some(DAY1);
        req.indicate_new_messages = false;
        let out = prepare_post_list(&req, DayClock::utc());
        assert!(!out.contains(&PostListItem::StartOfNewMessages));

        req.indicate_new_messages = true;
        let out = prepare_post_list(&req, DayClock::utc());
        assert_eq!(
            render(&out),
            ["p2", "p1", "start-of-new-messages", "date-2024-03-01"]
        );
    }

    #[test]
    fn unread_boundary_is_strictly_after_last_view() {
        let posts = vec![Post::new("p2", "b", DAY1 + 20), Post::new("p1", "b", DAY1 + 10)];
        let user = user_a();
        let mut req = input(&posts, Some(&user));
        req.last_viewed_at = Some(DAY1 + 10);
        let out = prepare_post_list(&req, DayClock::utc());
        assert_eq!(
            render(&out),
            ["p2", "start-of-new-messages", "p1", "date-2024-03-01"]
        );
    }

    #[test]
    fn own_posts_never_open_the_unread_section() {
        let posts = vec![Post::new("p2", "a", DAY1 + 20), Post::new("p1", "a", DAY1 + 10)];
        let user = user_a();
        let mut req = input(&posts, Some(&user));
        req.last_viewed_at = Some(0);
        let out = prepare_post_list(&req, DayClock::utc());
        assert!(!out.contains(&PostListItem::StartOfNewMessages));
    }

    #[test]
    fn hidden_join_leave_posts_are_dropped() {
        let join = |id: &str, who: &str, at: i64| {
            Post::new(id, "sys", at)
                .with_type(PostType::JoinChannel)
                .with_props(PostProps {
                    username: Some(who.to_string()),
                    ..PostProps::default()
                })
        };
        let posts = vec![
            join("j2", "alice", DAY1 + 30),
            join("j1", "bob", DAY1 + 20),
            Post::new("p1", "b", DAY1 + 10),
        ];
        let user = user_a();
        let mut req = input(&posts, Some(&user));
        req.show_join_leave = false;
        let out = prepare_post_list(&req, DayClock::utc());
        assert_eq!(render(&out), ["j2", "p1", "date-2024-03-01"]);
    }

    #[test]
    fn every_post_filtered_leaves_no_markers() {
        let posts = vec![
            Post::new("p1", "a", DAY1)
                .with_root("gone")
                .with_state(PostState::Deleted),
        ];
        let user = user_a();
        assert!(prepare_post_list(&input(&posts, Some(&user)), DayClock::utc()).is_empty());
    }

    #[test]
    fn day_lines_follow_the_clock_offset() {
        // 23:00Z on day one and 01:00Z on day two share a day in UTC-5.
        let posts = vec![
            Post::new("p2", "b", DAY2 + 3_600_000),
            Post::new("p1", "b", DAY2 - 3_600_000),
        ];
        let user = user_a();
        let req = input(&posts, Some(&user));

        let utc = prepare_post_list(&req, DayClock::utc());
        assert_eq!(utc.iter().filter(|item| item.is_marker()).count(), 2);

        let clock = DayClock::from_offset_minutes(-300).expect("valid offset");
        let shifted = prepare_post_list(&req, clock);
        assert_eq!(render(&shifted), ["p2", "p1", "date-2024-03-01"]);
    }
}
