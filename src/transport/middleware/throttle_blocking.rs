//! Rate-limit wrapper (blocking).

use super::throttle::ThrottleConfig;
use crate::{
    Error,
    transport::{ResponseMeta, TransportRequest, TransportResponse, blocking_transport::{BlockingTransport, DynBlockingTransport}},
};

/// Blocking twin of [`super::ThrottleAsync`].
#[derive(Clone)]
pub struct ThrottleBlocking {
    inner: DynBlockingTransport,
    config: ThrottleConfig,
}

impl ThrottleBlocking {
    #[must_use]
    pub fn new(inner: DynBlockingTransport, config: ThrottleConfig) -> Self {
        Self { inner, config }
    }
}

impl BlockingTransport for ThrottleBlocking {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let mut resp = self.inner.send(req)?;

        if resp.status.is_success() {
            let delay = self.config.effective_delay();
            std::thread::sleep(delay);
            resp.meta = ResponseMeta {
                throttled: Some(delay),
            };
        }

        Ok(resp)
    }
}
