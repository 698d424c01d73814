use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ParseEnumError;

/// Lifecycle state of a post.
///
/// Upstream records leave the state empty for live posts and set it to
/// `DELETED` once the post is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostState {
    #[default]
    #[serde(rename = "")]
    Normal,
    #[serde(rename = "DELETED")]
    Deleted,
}

impl PostState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for PostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostState {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "NORMAL" => Ok(Self::Normal),
            "DELETED" => Ok(Self::Deleted),
            _ => Err(ParseEnumError {
                expected: "post state",
                got: s.to_string(),
            }),
        }
    }
}

/// Post type tag.
///
/// Only the join/leave family matters to list preparation; every other
/// system type is carried through verbatim as [`PostType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostType {
    #[default]
    Regular,
    JoinChannel,
    LeaveChannel,
    AddToChannel,
    RemoveFromChannel,
    JoinTeam,
    LeaveTeam,
    AddToTeam,
    RemoveFromTeam,
    /// Legacy combined join/leave notification.
    JoinLeave,
    /// Legacy combined add/remove notification.
    AddRemove,
    Other(String),
}

impl PostType {
    pub const JOIN_LEAVE: [Self; 10] = [
        Self::JoinChannel,
        Self::LeaveChannel,
        Self::AddToChannel,
        Self::RemoveFromChannel,
        Self::JoinTeam,
        Self::LeaveTeam,
        Self::AddToTeam,
        Self::RemoveFromTeam,
        Self::JoinLeave,
        Self::AddRemove,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Regular => "",
            Self::JoinChannel => "system_join_channel",
            Self::LeaveChannel => "system_leave_channel",
            Self::AddToChannel => "system_add_to_channel",
            Self::RemoveFromChannel => "system_remove_from_channel",
            Self::JoinTeam => "system_join_team",
            Self::LeaveTeam => "system_leave_team",
            Self::AddToTeam => "system_add_to_team",
            Self::RemoveFromTeam => "system_remove_from_team",
            Self::JoinLeave => "system_join_leave",
            Self::AddRemove => "system_add_remove",
            Self::Other(raw) => raw,
        }
    }

    /// True for notifications about a user entering or leaving a channel or team.
    #[must_use]
    pub const fn is_join_leave(&self) -> bool {
        !matches!(self, Self::Regular | Self::Other(_))
    }
}

impl From<String> for PostType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "" => Self::Regular,
            "system_join_channel" => Self::JoinChannel,
            "system_leave_channel" => Self::LeaveChannel,
            "system_add_to_channel" => Self::AddToChannel,
            "system_remove_from_channel" => Self::RemoveFromChannel,
            "system_join_team" => Self::JoinTeam,
            "system_leave_team" => Self::LeaveTeam,
            "system_add_to_team" => Self::AddToTeam,
            "system_remove_from_team" => Self::RemoveFromTeam,
            "system_join_leave" => Self::JoinLeave,
            "system_add_remove" => Self::AddRemove,
            _ => Self::Other(raw),
        }
    }
}

impl From<PostType> for String {
    fn from(value: PostType) -> Self {
        match value {
            PostType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usernames a join/leave notification refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PostProps {
    pub username: Option<String>,
    #[serde(rename = "addedUsername")]
    pub added_username: Option<String>,
    #[serde(rename = "removedUsername")]
    pub removed_username: Option<String>,
}

impl PostProps {
    /// True when any referenced username equals `username`.
    #[must_use]
    pub fn mentions_username(&self, username: &str) -> bool {
        [
            &self.username,
            &self.added_username,
            &self.removed_username,
        ]
        .into_iter()
        .any(|name| name.as_deref() == Some(username))
    }
}

/// A single chat message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// Thread root this post replies to; `None` for root posts.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub root_id: Option<String>,
    /// Creation time in epoch milliseconds.
    pub create_at: i64,
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: PostState,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub post_type: PostType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub props: PostProps,
}

impl Post {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, create_at: i64) -> Self {
        Self {
            id: id.into(),
            root_id: None,
            create_at,
            user_id: user_id.into(),
            state: PostState::Normal,
            post_type: PostType::Regular,
            props: PostProps::default(),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    #[must_use]
    pub const fn with_state(mut self, state: PostState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn with_type(mut self, post_type: PostType) -> Self {
        self.post_type = post_type;
        self
    }

    #[must_use]
    pub fn with_props(mut self, props: PostProps) -> Self {
        self.props = props;
        self
    }

    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.state == PostState::Deleted
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|value| !value.is_empty()))
}
