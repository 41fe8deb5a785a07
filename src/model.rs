/// Identifier naming a user or a post. Zero means "not provided".
pub type Id = u64;

/// The falsy identifier.
pub const MISSING: Id = 0;

pub(crate) fn is_missing(id: Id) -> bool {
    id == MISSING
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    pub text: String,
}

impl User {
    /// The synthetic user every valid lookup returns, echoing `id`.
    pub fn synthetic(id: Id) -> Self {
        Self {
            id,
            name: "John Doe".to_owned(),
            email: "john.doe@example.com".to_owned(),
        }
    }
}

impl Post {
    /// The two posts every valid user has, in order.
    pub fn synthetic() -> Vec<Self> {
        vec![
            Self {
                id: 101,
                title: "My first post".to_owned(),
                body: "...".to_owned(),
            },
            Self {
                id: 102,
                title: "My second post".to_owned(),
                body: "...".to_owned(),
            },
        ]
    }
}

impl Comment {
    /// The two comments every valid post has, in order.
    pub fn synthetic() -> Vec<Self> {
        vec![
            Self {
                id: 1,
                text: "Great post!".to_owned(),
            },
            Self {
                id: 2,
                text: "Very informative, thanks.".to_owned(),
            },
        ]
    }
}
