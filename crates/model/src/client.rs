//! The unified query contract implemented by every provider client.

use crate::{Context, Options, Provider, Result};
use std::future::Future;

/// A provider client.
///
/// Constructors are inherent methods on each client and are never called
/// polymorphically; [`crate::new_client`] picks one by provider tag.
///
/// A client is owned by a single caller: construct it, run any number of
/// queries, then [`close`](Client::close) it.
pub trait Client {
    /// The provider this client talks to.
    fn provider(&self) -> Provider;

    /// Send `prompt` as a single user message to `model` and return the
    /// concatenated text of the answer.
    ///
    /// Validation (empty prompt, temperature) happens before any network
    /// activity. Exactly one request is made; the call is abandoned if `ctx`
    /// is cancelled or its deadline passes.
    fn query_text(
        &self,
        ctx: &Context,
        prompt: &str,
        model: &str,
        options: Options,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Release the transport. Later queries fail with `Closed`.
    fn close(&mut self);
}
