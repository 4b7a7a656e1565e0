use async_trait::async_trait;
#[cfg(test)] use mockall::automock;

use crate::stanza::Stanza;

/// The routing subsystem that re-dispatches stanzas through the server's general delivery
///  logic. Used at session close to hand back stanzas the peer never acknowledged.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PacketRouter: Send + Sync + 'static {
    async fn route(&self, stanza: Box<dyn Stanza>);
}
