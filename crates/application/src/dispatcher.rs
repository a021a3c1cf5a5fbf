//! Request dispatch
//!
//! A call moves through `Building -> Sending -> {Settled | Failed | Abandoned}`.
//! Building runs synchronously inside [`Dispatcher::send`], so configuration
//! faults surface as an `Err` before anything is sent. Sending runs on a
//! spawned task and reports on the returned [`ResultChannel`].

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{Instrument, debug, debug_span};

use courier_domain::page::envelope_content;
use courier_domain::{
    ClientSettings, EndpointDescriptor, Payload, SortSpec, encode_query, generate_call_id, route,
    synthesize_url,
};

use crate::channel::{ResultChannel, ResultSender, result_channel};
use crate::classifier::{ErrorClassifier, Verdict};
use crate::error::{ApplicationError, ApplicationResult};
use crate::headers::{HeaderComposer, Headers};
use crate::ports::{
    LoadingHandle, LoadingIndicator, Navigator, Notifier, PageState, SortSerializer,
    TokenStorage, Transport, TransportRequest,
};
use crate::session::SessionState;

/// Options of a single call. Created per call and consumed by it.
#[derive(Clone)]
pub struct RequestOptions {
    /// Endpoint to call.
    pub server: EndpointDescriptor,
    /// Flat payload, routed to the query or the body by verb.
    pub data: Payload,
    /// Extra headers; they override the auth token header on collision.
    pub headers: Option<Headers>,
    /// Path segments appended after the action.
    pub append: Vec<String>,
    /// Sort specification appended to the path.
    pub sort: Option<SortSpec>,
    /// Pagination state merged into the payload and updated from the response.
    pub page: Option<Arc<dyn PageState>>,
    /// Whether to show the blocking loading indicator.
    pub loading: bool,
    /// Whether an expired session should be reported as an error instead of
    /// redirecting to login.
    pub skip_auth: bool,
}

impl RequestOptions {
    /// Creates options for `server` with no payload.
    #[must_use]
    pub fn new(server: EndpointDescriptor) -> Self {
        Self {
            server,
            data: Payload::new(),
            headers: None,
            append: Vec::new(),
            sort: None,
            page: None,
            loading: false,
            skip_auth: false,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    /// Adds one payload entry.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Appends a path segment.
    #[must_use]
    pub fn append(mut self, segment: impl Into<String>) -> Self {
        self.append.push(segment.into());
        self
    }

    /// Sets the sort specification.
    #[must_use]
    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Attaches a pagination state.
    #[must_use]
    pub fn page(mut self, page: Arc<dyn PageState>) -> Self {
        self.page = Some(page);
        self
    }

    /// Shows the loading indicator while the call is in flight.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Reports an expired session as an error instead of redirecting.
    #[must_use]
    pub const fn skip_auth(mut self, skip_auth: bool) -> Self {
        self.skip_auth = skip_auth;
        self
    }
}

/// External collaborators of a [`Dispatcher`].
#[derive(Clone)]
pub struct DispatcherPorts {
    /// HTTP client.
    pub transport: Arc<dyn Transport>,
    /// Persistent storage holding the auth token.
    pub storage: Arc<dyn TokenStorage>,
    /// User notifications and dialogs.
    pub notifier: Arc<dyn Notifier>,
    /// Application routing.
    pub navigator: Arc<dyn Navigator>,
    /// Blocking loading indicator.
    pub loading: Arc<dyn LoadingIndicator>,
    /// Sort fragment rendering.
    pub sorter: Arc<dyn SortSerializer>,
    /// Process-wide session state, shared by every dispatcher.
    pub session: Arc<SessionState>,
}

/// Builds and sends calls.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    headers: HeaderComposer,
    loading: Arc<dyn LoadingIndicator>,
    sorter: Arc<dyn SortSerializer>,
    classifier: Arc<ErrorClassifier>,
    loading_text: String,
    dismiss_delay: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher from settings and collaborators.
    #[must_use]
    pub fn new(settings: &ClientSettings, ports: DispatcherPorts) -> Self {
        let classifier = ErrorClassifier::new(
            ports.session,
            ports.notifier,
            ports.navigator,
            settings.messages.clone(),
            settings.login_path.clone(),
        );
        Self {
            transport: ports.transport,
            headers: HeaderComposer::new(
                ports.storage,
                settings.auth_storage_key.clone(),
                settings.auth_header.clone(),
            ),
            loading: ports.loading,
            sorter: ports.sorter,
            classifier: Arc::new(classifier),
            loading_text: settings.messages.loading.clone(),
            dismiss_delay: Duration::from_millis(settings.loading_dismiss_delay_ms),
        }
    }

    /// Resolves `options` into the request that would be sent.
    ///
    /// Pagination parameters are merged into the payload before it is
    /// routed, so they land in the query for read-style verbs.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has no URL and no controller, or
    /// if the query cannot be encoded.
    pub fn prepare(&self, options: &RequestOptions) -> ApplicationResult<TransportRequest> {
        let method = options.server.method();
        let sort_query = options
            .sort
            .as_ref()
            .filter(|sort| !sort.is_empty())
            .map(|sort| self.sorter.serialize(sort));
        let url = synthesize_url(&options.server, options.append.as_slice(), sort_query.as_deref())?;

        let mut data = options.data.clone();
        if let Some(page) = &options.page {
            data.extend(page.config());
        }
        let routed = route(method, data);
        let query = routed
            .query
            .as_ref()
            .map(encode_query)
            .transpose()?
            .filter(|query| !query.is_empty());

        Ok(TransportRequest {
            method,
            url,
            headers: self.headers.compose(options.headers.as_ref()),
            body: routed.body,
            query,
        })
    }

    /// Dispatches one call.
    ///
    /// The loading indicator, when requested, is shown before this returns.
    /// The call itself runs on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or no tokio runtime
    /// is running. Transport failures are reported on the channel instead.
    pub fn send(&self, options: RequestOptions) -> ApplicationResult<ResultChannel> {
        let request = self.prepare(&options)?;
        let runtime = Handle::try_current().map_err(|e| ApplicationError::Runtime(e.to_string()))?;

        let call_id = generate_call_id();
        let span = debug_span!("call", call_id = %call_id, method = %request.method, url = %request.url);
        let (sender, channel) = result_channel(call_id);

        let indicator = options
            .loading
            .then(|| self.loading.show(&self.loading_text));

        let call = Call {
            transport: Arc::clone(&self.transport),
            classifier: Arc::clone(&self.classifier),
            page: options.page,
            skip_auth: options.skip_auth,
            indicator,
            dismiss_delay: self.dismiss_delay,
        };
        runtime.spawn(call.run(request, sender).instrument(span));

        Ok(channel)
    }
}

/// State moved into the task of one in-flight call.
struct Call {
    transport: Arc<dyn Transport>,
    classifier: Arc<ErrorClassifier>,
    page: Option<Arc<dyn PageState>>,
    skip_auth: bool,
    indicator: Option<Box<dyn LoadingHandle>>,
    dismiss_delay: Duration,
}

impl Call {
    async fn run(self, request: TransportRequest, sender: ResultSender) {
        let Self {
            transport,
            classifier,
            page,
            skip_auth,
            indicator,
            dismiss_delay,
        } = self;

        debug!(query = ?request.query, "sending request");
        let result = transport.request(request).await;

        if let Some(indicator) = indicator {
            dismiss_later(indicator, dismiss_delay);
        }

        match result {
            Ok(response) => {
                debug!("request succeeded");
                sender.settle(unwrap_page(page.as_deref(), response));
            }
            Err(failure) => match classifier.classify(failure, skip_auth) {
                Verdict::Fail(error) => sender.fail(error),
                Verdict::Abandon(reason) => {
                    debug!(?reason, "call abandoned");
                    sender.abandon(reason);
                }
            },
        }
    }
}

/// Updates `page` from a paginated envelope and returns its content.
fn unwrap_page(page: Option<&dyn PageState>, response: Value) -> Value {
    let Some(page) = page else {
        return response;
    };
    match envelope_content(&response) {
        Some(content) => {
            let content = content.clone();
            page.update(&response);
            content
        }
        None => response,
    }
}

/// Closes the indicator after `delay` so fast responses do not flicker.
fn dismiss_later(indicator: Box<dyn LoadingHandle>, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        indicator.close();
    });
}
