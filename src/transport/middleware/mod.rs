//! Re-exports for middleware layers.

pub mod throttle;

#[cfg(feature = "async")]
pub mod throttle_async;
#[cfg(feature = "blocking")]
pub mod throttle_blocking;

#[cfg(feature = "async")]
pub mod hook_async;
#[cfg(feature = "blocking")]
pub mod hook_blocking;

pub use throttle::ThrottleConfig;

#[cfg(feature = "async")]
pub use throttle_async::ThrottleAsync;
#[cfg(feature = "blocking")]
pub use throttle_blocking::ThrottleBlocking;

#[cfg(feature = "async")]
pub use hook_async::HookAsync;
#[cfg(feature = "blocking")]
pub use hook_blocking::HookBlocking;
