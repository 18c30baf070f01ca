// crates/sync-engine/src/executor.rs
//! Request executor
//!
//! Builds the request, picks a transport, forwards progress as it arrives and
//! emits exactly one terminal event. Holds no mutable state; concurrent calls
//! are independent and the store arbitrates between them by request id.

use crate::context::RequestContext;
use crate::dispatch::Dispatcher;
use crate::error::SyncResult;
use crate::resource::{ActionOptions, Resource};
use crate::url::expand_url;
use futures::{FutureExt, StreamExt};
use resync_config::EngineConfig;
use resync_core::{Event, FetchingEvent, ProgressEvent, ProgressUpdate, RequestId, StatusType};
use resync_network::{
    network_error, ClientConfig, Exchange, FetchTransport, Headers, HttpClient, NetworkError,
    PreparedRequest, ProgressTransport, RawResponse, RequestConfig, RequestDescriptor,
    ResponseStrategy, Transport, TransportError,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Sends resource requests and dispatches their events
#[derive(Clone)]
pub struct RequestExecutor {
    fetch: Arc<dyn Transport>,
    streaming: Arc<dyn Transport>,
    defaults: Headers,
}

impl RequestExecutor {
    /// Creates an executor from a plain transport and a progress-capable one
    pub fn new(fetch: impl Transport + 'static, streaming: impl Transport + 'static) -> Self {
        Self {
            fetch: Arc::new(fetch),
            streaming: Arc::new(streaming),
            defaults: Headers::json_defaults(),
        }
    }

    /// Builds both reqwest transports and the default headers from config
    pub fn from_config(config: &EngineConfig) -> SyncResult<Self> {
        let client = HttpClient::with_config(ClientConfig {
            timeout: config.http.timeout_secs.map(Duration::from_secs),
            user_agent: config.http.user_agent.clone(),
            max_redirects: config.http.max_redirects,
            upload_chunk_size: config.http.upload_chunk_size,
            use_env_proxy: config.http.use_env_proxy,
        })?;

        let defaults = Headers::try_from_pairs(config.headers.to_pairs())?;

        Ok(Self::new(FetchTransport::new(client.clone()), ProgressTransport::new(client))
            .with_default_headers(defaults))
    }

    /// Replaces the lowest header layer
    pub fn with_default_headers(mut self, defaults: Headers) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn default_headers(&self) -> &Headers {
        &self.defaults
    }

    /// Runs one request for `resource`
    ///
    /// Dispatches a fetching event, then any progress, then one success or
    /// error event. Transport failures and HTTP errors are dispatched as error
    /// events; `Err` is returned only when no terminal event can be built
    /// (URL or key derivation, a failing adaptor or error handler, a rejected
    /// dispatch).
    pub async fn execute<D: Dispatcher>(
        &self,
        resource: &Resource,
        options: ActionOptions,
        dispatcher: &mut D,
    ) -> SyncResult<()> {
        let key = match &options.key {
            Some(key) => key.clone(),
            None => resource.builder.key(&options.params, &resource.key_by)?,
        };
        let url = expand_url(&resource.request.url, &options.params)?;

        let context = RequestContext {
            action: &resource.action,
            request_id: RequestId::new(),
            key: &key,
            params: &options.params,
            key_by: &resource.key_by,
            projection: resource.projection.as_ref(),
            transforms: &resource.transforms,
        };

        let descriptor = RequestDescriptor {
            url,
            ..resource.request.clone()
        };
        let mut request = RequestConfig::new(&descriptor)
            .with_defaults(self.defaults.clone())
            .with_overrides(&options.request)
            .build()?;
        let strategy = ResponseStrategy::select(resource.adaptor.clone(), request.error_handler.take());

        dispatcher.dispatch(Event::Fetching(FetchingEvent {
            action: resource.action.clone(),
            request_id: context.request_id,
            status: StatusType::Fetching,
            key: Some(key.clone()),
            projection: context.projection(),
        }))?;

        let transport = if options.progress.unwrap_or(resource.progress) {
            &self.streaming
        } else {
            &self.fetch
        };
        log::debug!(
            "{} {} {} (request {}, progress: {})",
            resource.action,
            request.method,
            request.url,
            context.request_id,
            transport.reports_progress()
        );

        let result = exchange(transport.as_ref(), request, &context, dispatcher).await?;

        let event = match result {
            Err(err) => {
                log::warn!("{} failed before a response: {}", resource.action, err);
                resource
                    .builder
                    .on_error(&context, &options, 0, network_error(err.to_string()))
            }
            Ok(raw) => match strategy.normalize(&raw).await {
                Err(NetworkError::Decode(err)) => {
                    log::warn!("{} returned an unreadable body: {}", resource.action, err);
                    resource
                        .builder
                        .on_error(&context, &options, 0, network_error(err.to_string()))
                }
                Err(err) => return Err(err.into()),
                Ok(normalized) if !raw.is_success() || normalized.has_error() => {
                    log::warn!("{} failed with HTTP {}", resource.action, raw.status);
                    let error = normalized.error.unwrap_or(Value::Null);
                    resource.builder.on_error(&context, &options, raw.status, error)
                }
                Ok(normalized) => {
                    log::info!("{} succeeded with HTTP {}", resource.action, raw.status);
                    resource.builder.on_success(&context, &options, normalized.values)?
                }
            },
        };

        dispatcher.dispatch(event)
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

/// Sends the request, forwarding progress until the response is complete
///
/// Progress is polled first so an event already queued is never overtaken by
/// the response; anything still buffered afterwards is drained before return.
async fn exchange<D: Dispatcher>(
    transport: &dyn Transport,
    request: PreparedRequest,
    context: &RequestContext<'_>,
    dispatcher: &mut D,
) -> SyncResult<Result<RawResponse, TransportError>> {
    let Exchange { progress, response } = transport.send(request);
    let mut progress = progress.fuse();
    let mut response = response.fuse();

    let result = loop {
        futures::select_biased! {
            event = progress.select_next_some() => {
                dispatcher.dispatch(progress_event(context, event))?;
            }
            result = response => break result,
        }
    };

    while let Some(Some(event)) = progress.next().now_or_never() {
        dispatcher.dispatch(progress_event(context, event))?;
    }

    Ok(result)
}

fn progress_event(context: &RequestContext<'_>, progress: ProgressEvent) -> Event {
    Event::Progress(ProgressUpdate {
        action: context.action.to_string(),
        request_id: context.request_id,
        status: StatusType::Fetching,
        key: Some(context.key.clone()),
        projection: context.projection(),
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use resync_config::HeaderConfig;

    #[test]
    fn test_from_default_config() {
        let executor = RequestExecutor::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(executor.default_headers().get("accept"), Some("application/json"));
        assert_eq!(executor.default_headers().get("content-type"), Some("application/json"));
    }

    #[test]
    fn test_from_config_extra_headers() {
        let mut config = EngineConfig::default();
        config.headers = HeaderConfig {
            accept: "application/vnd.api+json".to_string(),
            ..HeaderConfig::default()
        };
        config.headers.extra.insert("X-Client".to_string(), "resync".to_string());

        let executor = RequestExecutor::from_config(&config).unwrap();
        let headers = executor.default_headers();
        assert_eq!(headers.get("Accept"), Some("application/vnd.api+json"));
        assert_eq!(headers.get("x-client"), Some("resync"));
        assert_eq!(headers.len(), 3);
    }
}
