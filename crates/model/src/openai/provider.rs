//! Client trait implementation for the OpenAI-compatible provider.

use super::{OpenAI, Request, Response, TEMPERATURE_MAX};
use crate::{Client, Context, Error, Options, Provider, Result, call_with_context};

impl Client for OpenAI {
    fn provider(&self) -> Provider {
        self.http.provider()
    }

    async fn query_text(
        &self,
        ctx: &Context,
        prompt: &str,
        model: &str,
        options: Options,
    ) -> Result<String> {
        let provider = self.provider();
        if self.transport.is_closed() {
            return Err(Error::Closed(provider));
        }
        if prompt.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        let temperature = options.scaled_temperature(TEMPERATURE_MAX)?;
        let client = self.transport.get(provider)?;

        let body = Request::new(model, prompt, temperature)
            .with_max_tokens(self.token_field, options.max_tokens_for(model))
            .with_response_format(options.response_format);

        let http = self.http.clone();
        let response: Response = call_with_context(ctx, move |_| async move {
            http.send(&client, &body).await
        })
        .await?;

        response.text().ok_or(Error::NoContent(provider))
    }

    fn close(&mut self) {
        self.transport.close();
    }
}
