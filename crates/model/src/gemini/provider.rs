//! Client trait implementation for the Gemini provider.

use super::{Gemini, Request, Response, TEMPERATURE_MAX};
use crate::{Client, Context, Error, Options, Provider, Result, call_with_context};

impl Client for Gemini {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn query_text(
        &self,
        ctx: &Context,
        prompt: &str,
        model: &str,
        options: Options,
    ) -> Result<String> {
        if self.transport.is_closed() {
            return Err(Error::Closed(Provider::Gemini));
        }
        if prompt.is_empty() {
            return Err(Error::EmptyPrompt);
        }
        let temperature = options.scaled_temperature(TEMPERATURE_MAX)?;
        let client = self.transport.get(Provider::Gemini)?;

        let body = Request::new(
            prompt,
            temperature,
            options.max_tokens_for(model),
            options.response_format,
        );

        let http = self.http.at(self.endpoint(model));
        let response: Response = call_with_context(ctx, move |_| async move {
            http.send(&client, &body).await
        })
        .await?;

        response.text().ok_or(Error::NoContent(Provider::Gemini))
    }

    fn close(&mut self) {
        self.transport.close();
    }
}
