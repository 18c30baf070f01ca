// crates/network/src/fetch.rs
//! Promise-style transport: one request, one response, no progress

use crate::client::{collect_response, HttpClient};
use crate::request::PreparedRequest;
use crate::transport::{Exchange, Transport};
use futures::FutureExt;

/// Simple transport used when progress is not requested
#[derive(Debug, Clone)]
pub struct FetchTransport {
    client: HttpClient,
}

impl FetchTransport {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl Transport for FetchTransport {
    fn send(&self, request: PreparedRequest) -> Exchange<'_> {
        Exchange::without_progress(
            async move {
                let mut builder = self.client.request(&request);
                if let Some(body) = request.body {
                    builder = builder.body(body);
                }

                let response = builder.send().await?;
                collect_response(response).await
            }
            .boxed(),
        )
    }
}
