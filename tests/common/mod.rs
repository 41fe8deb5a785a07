use std::{cell::RefCell, rc::Rc};

use async_sequencing::{Callback, Comment, DataSource, Id, Post, User, MISSING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    User,
    Posts,
    Comments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Invoked(Op, Id),
    Settled(Op),
}

/// A [`DataSource`] that logs every invocation and every callback.
pub struct Recording<S> {
    inner: S,
    events: Rc<RefCell<Vec<Event>>>,
}

impl<S> Recording<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            events: Rc::default(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn wrap<T: 'static>(&self, op: Op, id: Id, done: Callback<T>) -> Callback<T> {
        self.events.borrow_mut().push(Event::Invoked(op, id));
        let events = Rc::clone(&self.events);
        Box::new(move |outcome| {
            events.borrow_mut().push(Event::Settled(op));
            done(outcome);
        })
    }
}

impl<S: DataSource> DataSource for Recording<S> {
    fn fetch_user(&self, id: Id, done: Callback<User>) {
        self.inner.fetch_user(id, self.wrap(Op::User, id, done));
    }

    fn fetch_posts(&self, user_id: Id, done: Callback<Vec<Post>>) {
        self.inner.fetch_posts(user_id, self.wrap(Op::Posts, user_id, done));
    }

    fn fetch_comments(&self, post_id: Id, done: Callback<Vec<Comment>>) {
        self.inner.fetch_comments(post_id, self.wrap(Op::Comments, post_id, done));
    }
}

/// How many times `op` was invoked.
pub fn calls(events: &[Event], op: Op) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::Invoked(o, _) if *o == op))
        .count()
}

/// How a [`Faulty`] source breaks the posts lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The lookup fails as if no user id had been given.
    PostsFail,
    /// The lookup succeeds with no posts at all.
    NoPosts,
}

/// Delegates to `inner` except for the posts lookup, which breaks as `fault`
/// says. Completion still goes through `inner`, so it stays asynchronous.
pub struct Faulty<S> {
    inner: S,
    fault: Fault,
}

impl<S> Faulty<S> {
    pub fn new(inner: S, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

impl<S: DataSource> DataSource for Faulty<S> {
    fn fetch_user(&self, id: Id, done: Callback<User>) {
        self.inner.fetch_user(id, done);
    }

    fn fetch_posts(&self, user_id: Id, done: Callback<Vec<Post>>) {
        match self.fault {
            Fault::PostsFail => self.inner.fetch_posts(MISSING, done),
            Fault::NoPosts => self.inner.fetch_posts(
                user_id,
                Box::new(move |posts| done(posts.map(|_| Vec::new()))),
            ),
        }
    }

    fn fetch_comments(&self, post_id: Id, done: Callback<Vec<Comment>>) {
        self.inner.fetch_comments(post_id, done);
    }
}
