// crates/network/src/streaming.rs
//! Progress-capable transport
//!
//! Streams the request body in chunks and reads the response body chunk by
//! chunk, pushing UP and DOWN progress events as each chunk moves. The
//! completed exchange is folded back into a [`RawResponse`] so normalization
//! does not care which transport ran.

use crate::client::{response_head, HttpClient};
use crate::error::TransportError;
use crate::progress::{emit_progress, RawProgress};
use crate::request::PreparedRequest;
use crate::transport::{Exchange, Transport};
use bytes::{Bytes, BytesMut};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::{stream, FutureExt, StreamExt};
use resync_core::{Direction, ProgressEvent};

/// Content type assumed when the server does not declare one
const FALLBACK_CONTENT_TYPE: &str = "application/json";

/// Transport that reports upload and download progress
#[derive(Debug, Clone)]
pub struct ProgressTransport {
    client: HttpClient,
    chunk_size: usize,
}

impl ProgressTransport {
    pub fn new(client: HttpClient) -> Self {
        let chunk_size = client.config().upload_chunk_size.max(1);
        Self { client, chunk_size }
    }

    /// Overrides the upload chunk size from the client config
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Transport for ProgressTransport {
    fn send(&self, request: PreparedRequest) -> Exchange<'_> {
        let (tx, rx) = mpsc::unbounded::<ProgressEvent>();

        let response = async move {
            let mut builder = self.client.request(&request);
            if let Some(body) = request.body {
                if !body.is_empty() {
                    builder = builder.body(upload_body(body, self.chunk_size, tx.clone()));
                }
            }

            let mut response = builder.send().await?;
            let mut raw = response_head(&response);
            let total = response.content_length();

            let mut body = BytesMut::new();
            while let Some(chunk) = response.chunk().await? {
                body.extend_from_slice(&chunk);
                let progress = RawProgress::progress(body.len() as u64, total);
                // Receiver gone means nobody is listening; keep reading the body.
                let _ = tx.unbounded_send(emit_progress(progress, Direction::Down));
            }

            raw.body = body.freeze();
            if raw.content_type.is_none() {
                raw.content_type = Some(FALLBACK_CONTENT_TYPE.to_string());
            }

            Ok::<_, TransportError>(raw)
        }
        .boxed();

        Exchange {
            progress: rx.boxed(),
            response,
        }
    }

    fn reports_progress(&self) -> bool {
        true
    }
}

/// Wraps a body so each chunk pulled by the connection reports UP progress,
/// followed by an UP load-end after the last chunk.
fn upload_body(body: Bytes, chunk_size: usize, tx: UnboundedSender<ProgressEvent>) -> reqwest::Body {
    let total = body.len() as u64;
    let chunks = split_chunks(body, chunk_size);
    let mut loaded = 0u64;

    let chunks = stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        let _ = tx.unbounded_send(emit_progress(
            RawProgress::progress(loaded, Some(total)),
            Direction::Up,
        ));
        if loaded == total {
            let _ = tx.unbounded_send(emit_progress(
                RawProgress::load_end(loaded, Some(total)),
                Direction::Up,
            ));
        }
        Ok::<Bytes, std::io::Error>(chunk)
    });

    reqwest::Body::wrap_stream(chunks)
}

fn split_chunks(body: Bytes, chunk_size: usize) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(body.len() / chunk_size + 1);
    let mut start = 0;
    while start < body.len() {
        let end = (start + chunk_size).min(body.len());
        chunks.push(body.slice(start..end));
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_chunks() {
        let chunks = split_chunks(Bytes::from_static(b"abcdefghij"), 4);
        let lens: Vec<usize> = chunks.iter().map(Bytes::len).collect();
        assert_eq!(lens, vec![4, 4, 2]);
        assert_eq!(&chunks[2][..], b"ij");
    }

    #[test]
    fn test_split_chunks_exact_and_empty() {
        assert_eq!(split_chunks(Bytes::from_static(b"abcd"), 2).len(), 2);
        assert!(split_chunks(Bytes::new(), 2).is_empty());
    }

    #[test]
    fn test_transport_reports_progress() {
        let client = HttpClient::new().expect("Failed to create client");
        let transport = ProgressTransport::new(client).with_chunk_size(0);
        assert!(transport.reports_progress());
        assert_eq!(transport.chunk_size(), 1);
    }
}
