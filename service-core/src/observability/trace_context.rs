//! W3C Trace Context propagation for outgoing HTTP calls.
//!
//! Calls to third-party APIs carry the current span's `traceparent` so an
//! OTLP backend can stitch the upstream latency into the request trace.
//!
//! See: https://www.w3.org/TR/trace-context/

use opentelemetry::trace::TraceContextExt;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use std::fmt::Display;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// `traceparent` value for the current span, if it has a valid OTel context.
pub fn current_traceparent() -> Option<String> {
    let context = Span::current().context();
    let span = context.span();
    let span_context = span.span_context();
    if !span_context.is_valid() {
        return None;
    }

    // version-trace_id-span_id-trace_flags
    Some(format!(
        "00-{}-{}-{:02x}",
        span_context.trace_id(),
        span_context.span_id(),
        span_context.trace_flags().to_u8()
    ))
}

/// Add `traceparent` (and `tracestate` when non-empty) for the current span.
///
/// Leaves `headers` untouched when OTLP export is disabled.
pub fn inject_trace_context(headers: &mut HeaderMap) {
    let Some(traceparent) = current_traceparent() else {
        return;
    };
    if let Ok(value) = HeaderValue::from_str(&traceparent) {
        headers.insert(TRACEPARENT_HEADER, value);
    }

    let state = Span::current()
        .context()
        .span()
        .span_context()
        .trace_state()
        .header();
    if !state.is_empty()
        && let Ok(value) = HeaderValue::from_str(&state)
    {
        headers.insert(TRACESTATE_HEADER, value);
    }
}

/// Request builder whose `send` stamps the trace headers at the last moment,
/// inside whatever span is current when the call is awaited.
pub struct TracedRequest {
    inner: RequestBuilder,
}

impl TracedRequest {
    fn map(self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        Self {
            inner: f(self.inner),
        }
    }

    pub fn header(self, key: &'static str, value: &str) -> Self {
        self.map(|r| r.header(key, value))
    }

    pub fn query<T: Serialize + ?Sized>(self, query: &T) -> Self {
        self.map(|r| r.query(query))
    }

    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Self {
        self.map(|r| r.json(body))
    }

    pub fn bearer_auth<T: Display>(self, token: T) -> Self {
        self.map(|r| r.bearer_auth(token))
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);
        self.inner.headers(headers).send().await
    }
}

pub trait TracedClientExt {
    fn traced(&self, method: Method, url: &str) -> TracedRequest;

    fn traced_get(&self, url: &str) -> TracedRequest {
        self.traced(Method::GET, url)
    }

    fn traced_post(&self, url: &str) -> TracedRequest {
        self.traced(Method::POST, url)
    }
}

impl TracedClientExt for Client {
    fn traced(&self, method: Method, url: &str) -> TracedRequest {
        TracedRequest {
            inner: self.request(method, url),
        }
    }
}
