use std::rc::Rc;

use super::{first_post_id, Run, Stage, Stages};
use crate::{model::Id, source::DataSource};

/// Fetch the comments on `user_id`'s first post by nesting callbacks.
///
/// Returns immediately; `done` is called with the [`Run`] once the event
/// loop driving `source` has fired the last lookup.
pub fn run<S>(source: Rc<S>, user_id: Id, done: impl FnOnce(Run) + 'static)
where
    S: DataSource + ?Sized + 'static,
{
    let mut stages = Stages::start();
    let api = Rc::clone(&source);

    source.fetch_user(
        user_id,
        Box::new(move |user| match user {
            Err(err) => done(stages.finish(Err(err))),
            Ok(user) => {
                stages.advance(Stage::UserFetched);
                let next = Rc::clone(&api);

                api.fetch_posts(
                    user.id,
                    Box::new(move |posts| match posts {
                        Err(err) => done(stages.finish(Err(err))),
                        Ok(posts) => {
                            stages.advance(Stage::PostsFetched);

                            next.fetch_comments(
                                first_post_id(&posts),
                                Box::new(move |comments| match comments {
                                    Err(err) => done(stages.finish(Err(err))),
                                    Ok(comments) => {
                                        stages.advance(Stage::CommentsFetched);
                                        done(stages.finish(Ok(comments)));
                                    }
                                }),
                            );
                        }
                    }),
                );
            }
        }),
    );
}
