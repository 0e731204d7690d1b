use serde::{Deserialize, Serialize};

fn unknown_author() -> String {
    "Unknown".to_string()
}

/// A comment and its replies, as returned by `/comments/event/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub uid: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default = "unknown_author")]
    pub user_name: String,
    #[serde(default)]
    pub user_uid: Option<String>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// A comment positioned in a depth-first walk of a thread
#[derive(Debug, Clone, Copy)]
pub struct FlatComment<'a> {
    pub depth: usize,
    pub comment: &'a Comment,
}

impl Comment {
    /// Depth-first flattening of a thread, parents before their replies
    pub fn flatten(thread: &[Comment]) -> Vec<FlatComment<'_>> {
        let mut out = Vec::new();
        for comment in thread {
            comment.flatten_into(0, &mut out);
        }
        out
    }

    fn flatten_into<'a>(&'a self, depth: usize, out: &mut Vec<FlatComment<'a>>) {
        out.push(FlatComment {
            depth,
            comment: self,
        });
        for reply in &self.replies {
            reply.flatten_into(depth + 1, out);
        }
    }

    /// Total number of comments in a thread, replies included
    pub fn count(thread: &[Comment]) -> usize {
        thread.iter().map(|c| 1 + Self::count(&c.replies)).sum()
    }

    /// Attach `reply` beneath the comment with `parent_uid`.
    /// Returns false when the parent is not in the thread.
    pub fn insert_reply(thread: &mut [Comment], parent_uid: &str, reply: Comment) -> bool {
        let mut pending = Some(reply);
        Self::insert_reply_inner(thread, parent_uid, &mut pending);
        pending.is_none()
    }

    fn insert_reply_inner(thread: &mut [Comment], parent_uid: &str, pending: &mut Option<Comment>) {
        for comment in thread.iter_mut() {
            if pending.is_none() {
                return;
            }
            if comment.uid == parent_uid {
                if let Some(reply) = pending.take() {
                    comment.replies.push(reply);
                }
                return;
            }
            Self::insert_reply_inner(&mut comment.replies, parent_uid, pending);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub event_uid: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentReply {
    pub content: String,
}
