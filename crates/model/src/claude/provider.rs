//! Client trait implementation for the Claude (Anthropic) provider.

use super::{Claude, Request, Response, TEMPERATURE_MAX};
use crate::{Client, Context, Error, Options, Provider, Result, call_with_context};

impl Client for Claude {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn query_text(
        &self,
        ctx: &Context,
        prompt: &str,
        model: &str,
        options: Options,
    ) -> Result<String> {
        if self.transport.is_closed() {
            return Err(Error::Closed(Provider::Anthropic));
        }
        if prompt.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        let temperature = options.scaled_temperature(TEMPERATURE_MAX)?;
        let client = self.transport.get(Provider::Anthropic)?;

        // The response format hint has no Messages API equivalent.
        let body = Request::new(model, prompt, options.max_tokens_for(model), temperature);

        let http = self.http.clone();
        let response: Response = call_with_context(ctx, move |_| async move {
            http.send(&client, &body).await
        })
        .await?;

        response.text().ok_or(Error::NoContent(Provider::Anthropic))
    }

    fn close(&mut self) {
        self.transport.close();
    }
}
