//! Entries of a prepared post list and their string wire form.
//!
//! Internally the list is a tagged [`PostListItem`]; rendering code outside
//! this crate consumes plain strings, so `Display`/`FromStr` and serde all
//! go through the literal formats below.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt, str::FromStr};

use crate::day::{format_day, parse_day};

pub const DATE_LINE_PREFIX: &str = "date-";
pub const START_OF_NEW_MESSAGES: &str = "start-of-new-messages";
pub const DELETED_ROOT_POST: &str = "deleted-root-post";

/// One entry in a prepared post list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PostListItem {
    /// Separator before the first post of a calendar day.
    DateLine(NaiveDate),
    /// Boundary before the first unread post by someone else.
    StartOfNewMessages,
    /// Notice that the thread root is not part of the collection.
    DeletedRootPost,
    /// Reference to a post by id.
    Post(String),
}

impl PostListItem {
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        !matches!(self, Self::Post(_))
    }

    #[must_use]
    pub fn post_id(&self) -> Option<&str> {
        match self {
            Self::Post(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for PostListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateLine(day) => write!(f, "{DATE_LINE_PREFIX}{}", format_day(*day)),
            Self::StartOfNewMessages => f.write_str(START_OF_NEW_MESSAGES),
            Self::DeletedRootPost => f.write_str(DELETED_ROOT_POST),
            Self::Post(id) => f.write_str(id),
        }
    }
}

impl FromStr for PostListItem {
    type Err = Infallible;

    /// Anything that is not a recognised marker is a post id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == START_OF_NEW_MESSAGES {
            return Ok(Self::StartOfNewMessages);
        }
        if s == DELETED_ROOT_POST {
            return Ok(Self::DeletedRootPost);
        }
        if let Some(day) = s.strip_prefix(DATE_LINE_PREFIX).and_then(parse_day) {
            return Ok(Self::DateLine(day));
        }
        Ok(Self::Post(s.to_string()))
    }
}

impl Serialize for PostListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostListItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(item) = raw.parse::<Self>();
        Ok(item)
    }
}
