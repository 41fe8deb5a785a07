use super::{first_post_id, Run, Stage, Stages};
use crate::{
    error::FetchError,
    model::{Comment, Id},
    promise::Promised,
    source::DataSource,
};

/// Fetch the comments on `user_id`'s first post with `async`/`await`.
pub async fn run<S: DataSource>(api: &Promised<S>, user_id: Id) -> Run {
    let mut stages = Stages::start();
    let outcome = fetch_comments(api, user_id, &mut stages).await;
    stages.finish(outcome)
}

async fn fetch_comments<S: DataSource>(
    api: &Promised<S>,
    user_id: Id,
    stages: &mut Stages,
) -> Result<Vec<Comment>, FetchError> {
    let user = api.user(user_id).await?;
    stages.advance(Stage::UserFetched);

    let posts = api.posts(user.id).await?;
    stages.advance(Stage::PostsFetched);

    let comments = api.comments(first_post_id(&posts)).await?;
    stages.advance(Stage::CommentsFetched);

    Ok(comments)
}
