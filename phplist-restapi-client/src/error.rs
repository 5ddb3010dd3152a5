/// Errors surfaced by API operations.
///
/// Only transport-level faults (DNS, connection refused, timeout, TLS) are
/// errors. A well-formed error envelope or an unexpected payload shape is
/// reported as the operation's `None`/`false` result instead, so callers
/// can tell "the server said no" apart from "the call never happened".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),
}
