use std::io;

use futures::StreamExt;
use poem::error::SizedLimitError;
use poem::web::headers::{self, HeaderMapExt};
use poem::{Body, Endpoint, Middleware, Request, Result};

/// Largest `/api/submissions` request: one photo plus the text fields
pub const SUBMISSION_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Largest `/setup-admin` request
pub const SETUP_BODY_LIMIT: usize = 16 * 1024;

/// Cap on request body size
///
/// A declared `Content-Length` above the cap answers 413 up front. Bodies
/// without one are still accepted, but the stream fails once it passes the
/// cap so nothing downstream reads more than `max_size` bytes.
pub struct BodyLimit {
    max_size: usize,
}

impl BodyLimit {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }
}

impl<E: Endpoint> Middleware<E> for BodyLimit {
    type Output = BodyLimitEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        BodyLimitEndpoint {
            inner: ep,
            max_size: self.max_size,
        }
    }
}

pub struct BodyLimitEndpoint<E> {
    inner: E,
    max_size: usize,
}

impl<E: Endpoint> Endpoint for BodyLimitEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, mut req: Request) -> Result<Self::Output> {
        if let Some(content_length) = req.headers().typed_get::<headers::ContentLength>() {
            if content_length.0 > self.max_size as u64 {
                tracing::warn!(
                    "Rejected {} request body of {} bytes (limit {})",
                    req.uri().path(),
                    content_length.0,
                    self.max_size
                );
                return Err(SizedLimitError::PayloadTooLarge.into());
            }
        }

        let max_size = self.max_size;
        let mut seen = 0usize;
        let capped = req.take_body().into_bytes_stream().map(move |chunk| {
            let chunk = chunk?;
            seen += chunk.len();
            if seen > max_size {
                return Err(io::Error::other("request body exceeds size limit"));
            }
            Ok(chunk)
        });
        req.set_body(Body::from_bytes_stream(capped));

        self.inner.call(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::{handler, post, EndpointExt, Route};

    #[handler]
    async fn echo(body: Body) -> Result<Vec<u8>> {
        Ok(body.into_vec().await?)
    }

    fn client() -> TestClient<Route> {
        TestClient::new(Route::new().at("/", post(echo).with(BodyLimit::new(5))))
    }

    #[tokio::test]
    async fn test_declared_length_over_limit_is_rejected() {
        client()
            .post("/")
            .header("content-length", 6)
            .body(&b"123456"[..])
            .send()
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_streamed_body_over_limit_fails_to_read() {
        let resp = client()
            .post("/")
            .body(Body::from_async_read(&b"1234567890"[..]))
            .send()
            .await;

        assert_eq!(resp.0.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_body_within_limit_passes_through() {
        let resp = client()
            .post("/")
            .body(Body::from_async_read(&b"12345"[..]))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.assert_bytes("12345").await;
    }
}
