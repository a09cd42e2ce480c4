//! Rate-limit wrapper (async).

use super::throttle::ThrottleConfig;
use crate::{
    Error,
    transport::{ResponseMeta, TransportRequest, TransportResponse, async_transport::{AsyncTransport, DynAsyncTransport}},
};
use async_trait::async_trait;
use tokio::time::sleep;

/// Enforces minimum inter-request spacing by sleeping after each successful
/// response. Errors propagate immediately without the sleep, matching the
/// ordering callers observe: a failed request never delays its own report.
#[derive(Clone)]
pub struct ThrottleAsync {
    inner: DynAsyncTransport,
    config: ThrottleConfig,
}

impl ThrottleAsync {
    #[must_use]
    pub fn new(inner: DynAsyncTransport, config: ThrottleConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl AsyncTransport for ThrottleAsync {
    async fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let mut resp = self.inner.send(req).await?;

        if resp.status.is_success() {
            let delay = self.config.effective_delay();
            sleep(delay).await;
            resp.meta = ResponseMeta {
                throttled: Some(delay),
            };
        }

        Ok(resp)
    }
}
