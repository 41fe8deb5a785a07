//! Turning callback-style lookups into futures.
//!
//! A [`Settlement`] is the receiving half of a one-shot slot; its
//! [`Resolver`] is handed to a callback and consumed when the callback
//! fires, so a settlement can only ever be settled once.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll, Waker},
};

use std::{cell::RefCell, rc::Rc};

use crate::{
    error::FetchError,
    model::{Comment, Id, Post, User},
    source::{Callback, DataSource},
};

struct Shared<T> {
    outcome: Option<Result<T, FetchError>>,
    waker: Option<Waker>,
}

type Handle<T> = Rc<RefCell<Shared<T>>>;

/// Future completing with the outcome passed to its [`Resolver`].
///
/// If the resolver is dropped without settling, the settlement stays pending
/// forever.
pub struct Settlement<T> {
    handle: Handle<T>,
}

pub struct Resolver<T> {
    handle: Handle<T>,
}

pub fn settlement<T>() -> (Resolver<T>, Settlement<T>) {
    let handle = Rc::new(RefCell::new(Shared {
        outcome: None,
        waker: None,
    }));
    (
        Resolver {
            handle: Rc::clone(&handle),
        },
        Settlement { handle },
    )
}

impl<T> Resolver<T> {
    pub fn settle(self, outcome: Result<T, FetchError>) {
        let waker = {
            let mut shared = self.handle.borrow_mut();
            shared.outcome = Some(outcome);
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T> Future for Settlement<T> {
    type Output = Result<T, FetchError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.handle.borrow_mut();

        if let Some(outcome) = shared.outcome.take() {
            return Poll::Ready(outcome);
        }

        // keep the most recent waker in case we moved between tasks.
        match &mut shared.waker {
            Some(waker) => waker.clone_from(cx.waker()),
            None => shared.waker = Some(cx.waker().clone()),
        }
        Poll::Pending
    }
}

/// Start a callback-style operation and return a future of its outcome.
pub fn promisify<T: 'static>(start: impl FnOnce(Callback<T>)) -> Settlement<T> {
    let (resolver, settlement) = settlement();
    start(Box::new(move |outcome| resolver.settle(outcome)));
    settlement
}

/// Future-returning view of a [`DataSource`].
pub struct Promised<S> {
    source: S,
}

impl<S: DataSource> Promised<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn user(&self, id: Id) -> Settlement<User> {
        promisify(|done| self.source.fetch_user(id, done))
    }

    pub fn posts(&self, user_id: Id) -> Settlement<Vec<Post>> {
        promisify(|done| self.source.fetch_posts(user_id, done))
    }

    pub fn comments(&self, post_id: Id) -> Settlement<Vec<Comment>> {
        promisify(|done| self.source.fetch_comments(post_id, done))
    }
}
