use core::cell::RefCell;

use futures_lite::future;

use super::{first_post_id, Run, Stage, Stages};
use crate::{chain::Chain, model::Id, promise::Promised, source::DataSource};

/// Fetch the comments on `user_id`'s first post as one chain of
/// [`and_then`](Chain::and_then) steps.
pub async fn run<S: DataSource>(api: &Promised<S>, user_id: Id) -> Run {
    let stages = RefCell::new(Stages::start());

    let outcome = api
        .user(user_id)
        .and_then(|user| {
            stages.borrow_mut().advance(Stage::UserFetched);
            api.posts(user.id)
        })
        .and_then(|posts| {
            stages.borrow_mut().advance(Stage::PostsFetched);
            api.comments(first_post_id(&posts))
        })
        .and_then(|comments| {
            stages.borrow_mut().advance(Stage::CommentsFetched);
            future::ready(Ok(comments))
        })
        .await;

    stages.into_inner().finish(outcome)
}
