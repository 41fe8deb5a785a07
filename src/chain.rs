//! Promise-style chaining for fallible futures.
//!
//! `a.and_then(f)` waits for `a`; on `Ok(v)` it continues with the future
//! `f(v)`, on `Err(e)` it finishes with `Err(e)` and `f` is never called.

use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures_lite::ready;
use pin_project::pin_project;

pub trait Chain: Future + Sized {
    fn and_then<F, Next, T, U, E>(self, f: F) -> AndThen<Self, F, Next>
    where
        Self: Future<Output = Result<T, E>>,
        F: FnOnce(T) -> Next,
        Next: Future<Output = Result<U, E>>,
    {
        AndThen::First {
            future: self,
            f: Some(f),
        }
    }
}

impl<Fut: Future> Chain for Fut {}

#[pin_project(project = AndThenProj)]
pub enum AndThen<Fut, F, Next> {
    First {
        #[pin]
        future: Fut,
        f: Option<F>,
    },
    Second {
        #[pin]
        future: Next,
    },
    Done,
}

impl<Fut, F, Next, T, U, E> Future for AndThen<Fut, F, Next>
where
    Fut: Future<Output = Result<T, E>>,
    F: FnOnce(T) -> Next,
    Next: Future<Output = Result<U, E>>,
{
    type Output = Result<U, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            match self.as_mut().project() {
                AndThenProj::First { future, f } => {
                    let outcome = ready!(future.poll(cx));
                    let f = f.take().expect("continuation is taken only once");
                    match outcome {
                        Ok(value) => self.set(Self::Second { future: f(value) }),
                        Err(err) => {
                            self.set(Self::Done);
                            return Poll::Ready(Err(err));
                        }
                    }
                }
                AndThenProj::Second { future } => {
                    let outcome = ready!(future.poll(cx));
                    self.set(Self::Done);
                    return Poll::Ready(outcome);
                }
                AndThenProj::Done => panic!("`AndThen` polled after completion"),
            }
        }
    }
}
