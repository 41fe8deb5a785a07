//! The simulated network API, in callback style.
//!
//! Each operation takes an identifier and a completion callback that is
//! invoked exactly once, later, from the event loop. A missing identifier
//! completes with an error; anything else completes with the fixed synthetic
//! payload.

use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    delay::DelayStrategy,
    error::FetchError,
    event_loop::EventLoop,
    model::{is_missing, Comment, Id, Post, User},
};

/// One-shot completion callback of a lookup.
pub type Callback<T> = Box<dyn FnOnce(Result<T, FetchError>)>;

pub trait DataSource {
    fn fetch_user(&self, id: Id, done: Callback<User>);
    fn fetch_posts(&self, user_id: Id, done: Callback<Vec<Post>>);
    fn fetch_comments(&self, post_id: Id, done: Callback<Vec<Comment>>);
}

impl<S: DataSource + ?Sized> DataSource for Rc<S> {
    fn fetch_user(&self, id: Id, done: Callback<User>) {
        (**self).fetch_user(id, done);
    }

    fn fetch_posts(&self, user_id: Id, done: Callback<Vec<Post>>) {
        (**self).fetch_posts(user_id, done);
    }

    fn fetch_comments(&self, post_id: Id, done: Callback<Vec<Comment>>) {
        (**self).fetch_comments(post_id, done);
    }
}

/// Lookups answered from fixed data after a delay on an [`EventLoop`].
pub struct SimulatedApi {
    event_loop: EventLoop,
    delay: Box<dyn DelayStrategy>,
}

impl SimulatedApi {
    pub fn new(event_loop: EventLoop, delay: impl DelayStrategy + 'static) -> Self {
        Self {
            event_loop,
            delay: Box::new(delay),
        }
    }

    /// Run `lookup` after the next delay and hand its result to `done`.
    fn respond<T: 'static>(
        &self,
        operation: &'static str,
        done: Callback<T>,
        lookup: impl FnOnce() -> Result<T, FetchError> + 'static,
    ) {
        let delay = self.delay.next_delay();
        debug!(operation, ?delay, "lookup scheduled");
        self.event_loop.set_timeout(delay, move || done(lookup()));
    }
}

impl DataSource for SimulatedApi {
    fn fetch_user(&self, id: Id, done: Callback<User>) {
        self.respond("fetch_user", done, move || {
            if is_missing(id) {
                return Err(FetchError::MissingUserId);
            }
            info!("Looking up user with ID: {id}...");
            Ok(User::synthetic(id))
        });
    }

    fn fetch_posts(&self, user_id: Id, done: Callback<Vec<Post>>) {
        self.respond("fetch_posts", done, move || {
            if is_missing(user_id) {
                return Err(FetchError::MissingUserIdForPosts);
            }
            info!("Looking up posts of user with ID: {user_id}...");
            Ok(Post::synthetic())
        });
    }

    fn fetch_comments(&self, post_id: Id, done: Callback<Vec<Comment>>) {
        self.respond("fetch_comments", done, move || {
            if is_missing(post_id) {
                return Err(FetchError::MissingPostId);
            }
            info!("Looking up comments of post with ID: {post_id}...");
            Ok(Comment::synthetic())
        });
    }
}
