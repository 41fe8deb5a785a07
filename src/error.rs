use thiserror::Error;

/// The one failure a simulated lookup can report: an identifier was missing.
///
/// Each operation has its own variant so the message says which lookup was
/// refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Error: user ID not provided.")]
    MissingUserId,
    #[error("Error: user ID not provided to fetch posts.")]
    MissingUserIdForPosts,
    #[error("Error: post ID not provided to fetch comments.")]
    MissingPostId,
}

/// Errors raised by the event loop itself rather than by the operations it
/// drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EventLoopError {
    /// The root future is pending but no timer is left that could wake it.
    #[error("future is pending with no timers left to wake it")]
    Stalled,
}
