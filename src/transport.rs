use async_trait::async_trait;
#[cfg(test)] use mockall::automock;
use std::net::SocketAddr;

/// The session's transport, reduced to what this crate needs: writing raw protocol text to
///  the peer. Writes are fire-and-forget - the transport owns retry and teardown handling,
///  and this crate never blocks on their outcome.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionTransport: Send + Sync + 'static {
    async fn deliver_raw_text(&self, text: &str);

    /// The peer's network address, for log correlation only. `None` if the transport cannot
    ///  determine it (e.g. the host lookup failed).
    fn remote_address(&self) -> Option<SocketAddr>;
}
