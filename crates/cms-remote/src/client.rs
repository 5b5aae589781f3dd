//! Blocking HTTP implementation of the remote-source contract

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use cms_core::diff::Changeset;
use cms_core::remote::RemoteSource;
use cms_core::{ExError, ExErrorKind, RecordKind, Record};
use cms_core_types::RequestContext;

use crate::config::RemoteConfig;
use crate::endpoints::{Endpoints, Method, Route};
use crate::status::{map_status, map_transport};

pub const HEADER_REQUEST_ID: &str = "x-request-id";
pub const HEADER_IDEMPOTENCY_KEY: &str = "idempotency-key";
const SESSION_COOKIE: &str = "token";

/// Remote source for one record kind, backed by the admin REST API
///
/// Every request carries the correlation id as `x-request-id`. Changeset
/// submissions also carry the changeset digest as `idempotency-key`, so the
/// server can recognise a retried submission.
#[derive(Debug)]
pub struct HttpRemote {
    config: RemoteConfig,
    endpoints: Endpoints,
    client: Client,
}

impl HttpRemote {
    /// # Errors
    ///
    /// Returns `ERR_CONFIG` if the HTTP client cannot be built.
    pub fn new(config: RemoteConfig, kind: RecordKind) -> Result<Self, ExError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Config)
                    .with_op("build_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self {
            config,
            endpoints: Endpoints::new(kind),
            client,
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.endpoints.kind()
    }

    fn request(&self, route: &Route, ctx: &RequestContext) -> RequestBuilder {
        let url = self.config.url(&route.path);
        let builder = match route.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = builder.header(HEADER_REQUEST_ID, ctx.request_id.as_str());
        match &self.config.session_token {
            Some(token) => builder.header(
                reqwest::header::COOKIE,
                format!("{SESSION_COOKIE}={}", token.expose()),
            ),
            None => builder,
        }
    }

    /// Send a request and return the body of a success response
    fn send(
        &self,
        op: &str,
        route: &Route,
        builder: RequestBuilder,
        ctx: &RequestContext,
    ) -> Result<String, ExError> {
        tracing::debug!(op, method = ?route.method, path = %route.path, request_id = %ctx.request_id, "sending request");

        let response = builder.send().map_err(|e| {
            map_transport(&e)
                .with_op(op)
                .with_request_id(ctx.request_id.clone())
        })?;
        let status = response.status();
        let body = response.text().map_err(|e| {
            map_transport(&e)
                .with_op(op)
                .with_status(status.as_u16())
                .with_request_id(ctx.request_id.clone())
        })?;

        tracing::debug!(op, status = status.as_u16(), request_id = %ctx.request_id, "response received");

        if status.is_success() {
            Ok(body)
        } else {
            Err(map_status(status.as_u16(), &body)
                .with_op(op)
                .with_request_id(ctx.request_id.clone()))
        }
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        op: &str,
        route: &Route,
        body: Option<&B>,
        extra_header: Option<(&str, &str)>,
        ctx: &RequestContext,
    ) -> Result<T, ExError> {
        let mut builder = self.request(route, ctx);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some((name, value)) = extra_header {
            builder = builder.header(name, value);
        }
        let text = self.send(op, route, builder, ctx)?;
        decode(op, &text, ctx)
    }
}

fn decode<T: DeserializeOwned>(op: &str, text: &str, ctx: &RequestContext) -> Result<T, ExError> {
    serde_json::from_str(text).map_err(|e| {
        ExError::from(e)
            .with_op(op)
            .with_request_id(ctx.request_id.clone())
    })
}

impl RemoteSource for HttpRemote {
    fn fetch_record(&mut self, id: Option<&str>, ctx: &RequestContext) -> Result<Record, ExError> {
        let route = self.endpoints.fetch(id)?;
        self.send_json::<(), Record>("fetch_record", &route, None, None, ctx)
    }

    fn apply_changeset(
        &mut self,
        id: Option<&str>,
        changeset: &Changeset,
        ctx: &RequestContext,
    ) -> Result<Record, ExError> {
        let route = self.endpoints.update(id)?;
        let digest = changeset.digest();
        self.send_json(
            "apply_changeset",
            &route,
            Some(changeset),
            Some((HEADER_IDEMPOTENCY_KEY, digest.as_str())),
            ctx,
        )
    }

    fn create_record(&mut self, record: &Record, ctx: &RequestContext) -> Result<Record, ExError> {
        let route = self.endpoints.create()?;
        self.send_json("create_record", &route, Some(record), None, ctx)
    }

    fn delete_record(&mut self, id: &str, ctx: &RequestContext) -> Result<(), ExError> {
        let route = self.endpoints.delete(id)?;
        let builder = self.request(&route, ctx);
        self.send("delete_record", &route, builder, ctx)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn remote(kind: RecordKind) -> HttpRemote {
        let config = RemoteConfig::new("http://127.0.0.1:9")
            .unwrap()
            .with_session_token("abc123");
        HttpRemote::new(config, kind).unwrap()
    }

    #[test]
    fn test_request_carries_correlation_and_cookie() {
        let remote = remote(RecordKind::Category);
        let ctx = RequestContext::new();
        let route = remote.endpoints.fetch(Some("c1")).unwrap();
        let request = remote.request(&route, &ctx).build().unwrap();

        assert_eq!(request.url().as_str(), "http://127.0.0.1:9/categories/c1");
        assert_eq!(
            request.headers().get(HEADER_REQUEST_ID).unwrap(),
            ctx.request_id.as_str()
        );
        assert_eq!(
            request.headers().get(reqwest::header::COOKIE).unwrap(),
            "token=abc123"
        );
    }

    #[test]
    fn test_missing_id_fails_before_any_request() {
        let mut remote = remote(RecordKind::Project);
        let err = remote
            .fetch_record(None, &RequestContext::new())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.status().is_none());
    }

    #[test]
    fn test_decode_failure_is_serialization_error() {
        let ctx = RequestContext::new();
        let err = decode::<Record>("fetch_record", "<html>", &ctx).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
        assert_eq!(err.op(), Some("fetch_record"));
    }
}
