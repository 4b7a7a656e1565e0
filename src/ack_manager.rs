use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::config::AckConfig;
use crate::control_element::{self, ControlElement, FALLBACK_NAMESPACE};
use crate::peer_address::PeerAddress;
use crate::router::PacketRouter;
use crate::seq_no::SeqNo;
use crate::stanza::Stanza;
use crate::transport::SessionTransport;

/// An outbound stanza awaiting acknowledgement by the peer: an independent copy of the
///  stanza, and the instant it was buffered.
#[derive(Debug)]
pub struct UnackedPacket {
    pub timestamp: SystemTime,
    pub stanza: Box<dyn Stanza>,
}

struct AckManagerInner {
    /// The negotiated protocol revision. `None` means the feature is disabled - initially
    ///  because the peer has not (yet) negotiated it on, permanently after close.
    namespace: Option<String>,

    /// stanzas sent from the server to the peer (not necessarily processed there)
    sent_count: SeqNo,

    /// stanzas sent by the peer that the server has processed
    server_processed_count: SeqNo,

    /// stanzas sent by the server that the peer has processed
    client_processed_count: SeqNo,

    /// Sent stanzas the peer has not acknowledged yet, in send order.
    ///
    /// NB: While enabled, `unacked.len() == sent_count.delta_since(client_processed_count)`.
    unacked: VecDeque<UnackedPacket>,
}

impl AckManagerInner {
    fn is_enabled(&self) -> bool {
        self.namespace.is_some()
    }
}

/// Per-session acknowledgement state: one instance per live session, shared between the
///  session's outbound send path, its inbound control-element path and the close path.
///
/// All counter and buffer mutations happen under a single exclusive lock; transport writes
///  happen outside it, so a slow peer never blocks bookkeeping for other operations.
pub struct AckManager {
    config: Arc<AckConfig>,
    transport: Arc<dyn SessionTransport>,

    /// the peer's network address, for log correlation
    peer: String,

    inner: Mutex<AckManagerInner>,
}

impl AckManager {
    pub fn new(config: Arc<AckConfig>, transport: Arc<dyn SessionTransport>) -> AckManager {
        let peer = transport.remote_address()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "(unknown address)".to_string());

        AckManager {
            config,
            transport,
            peer,
            inner: Mutex::new(AckManagerInner {
                namespace: None,
                sent_count: SeqNo::ZERO,
                server_processed_count: SeqNo::ZERO,
                client_processed_count: SeqNo::ZERO,
                unacked: VecDeque::new(),
            }),
        }
    }

    pub async fn is_enabled(&self) -> bool {
        self.inner.lock().await.is_enabled()
    }

    /// Dispatches an inbound control element, processed on behalf of the given peer entity.
    pub async fn process(&self, element: &ControlElement, on_behalf_of: &PeerAddress) {
        match element.name.as_str() {
            "enable" => self.enable(on_behalf_of, &element.namespace).await,
            "r" => self.send_ack().await,
            "a" => self.process_client_ack(element).await,
            _ => {
                debug!(peer = %self.peer, "unexpected control element {:?}", element.name);
                self.send_unexpected_error().await;
            }
        }
    }

    /// Attempts to enable acknowledgements for the session, in the requested protocol
    ///  revision. Re-enabling is a silent no-op, the first negotiated revision stays in
    ///  effect and no duplicate confirmation is sent.
    async fn enable(&self, on_behalf_of: &PeerAddress, requested_namespace: &str) {
        // the peer must have bound a resource first
        if !on_behalf_of.is_bound() {
            debug!(peer = %self.peer, "enable request from {:?} before resource binding", on_behalf_of);
            self.send_unexpected_error().await;
            return;
        }

        {
            let mut inner = self.inner.lock().await;
            if inner.is_enabled() {
                return;
            }
            inner.namespace = Some(requested_namespace.to_string());
        }
        debug!(peer = %self.peer, "enabled acknowledgements for {:?} with namespace {}",
            on_behalf_of, requested_namespace);

        // confirm to the requestee
        self.transport.deliver_raw_text(&control_element::enabled_text(requested_namespace)).await;
    }

    /// Registers an outbound stanza: counts it and buffers an independent copy until the
    ///  peer acknowledges it. Every `request_frequency` stanzas the peer is asked to report
    ///  its processed count.
    pub async fn on_stanza_sent(&self, stanza: &dyn Stanza) {
        let request_namespace = {
            let mut inner = self.inner.lock().await;
            if !inner.is_enabled() {
                return;
            }

            inner.sent_count = inner.sent_count.next();
            inner.unacked.push_back(UnackedPacket {
                timestamp: SystemTime::now(),
                stanza: stanza.deep_copy(),
            });
            trace!(peer = %self.peer, "buffered outbound stanza, {} sent / {} unacknowledged",
                inner.sent_count, inner.unacked.len());

            if self.config.request_frequency > 0
                && inner.sent_count.to_raw() % self.config.request_frequency == 0
            {
                inner.namespace.clone()
            }
            else {
                None
            }
        };

        if let Some(namespace) = request_namespace {
            self.transport.deliver_raw_text(&control_element::ack_request_text(&namespace)).await;
        }
    }

    /// Reports the server's processed count to the peer.
    ///
    /// NB: The count is read under the lock but written outside it, so the reported value
    ///      may race a concurrent increment. A later ack simply reports the larger value.
    pub async fn send_ack(&self) {
        let text = {
            let inner = self.inner.lock().await;
            match &inner.namespace {
                Some(namespace) => control_element::ack_text(namespace, inner.server_processed_count),
                None => return,
            }
        };
        self.transport.deliver_raw_text(&text).await;
    }

    /// Registers an inbound stanza as successfully processed. Called by the session once
    ///  per dispatched stanza.
    pub async fn increment_server_processed(&self) {
        let mut inner = self.inner.lock().await;
        if inner.is_enabled() {
            inner.server_processed_count = inner.server_processed_count.next();
        }
    }

    /// Processes the peer's report of how many of our stanzas it has processed: drops
    ///  acknowledged stanzas from the buffer and advances the counter.
    async fn process_client_ack(&self, element: &ControlElement) {
        let mut inner = self.inner.lock().await;
        if !inner.is_enabled() {
            return;
        }

        let reported = match element.ack_count() {
            Ok(Some(reported)) => reported,
            Ok(None) => return,
            Err(e) => {
                warn!(peer = %self.peer, "discarding unreadable ack: {}", e);
                return;
            }
        };

        if reported.wrapped_from(inner.client_processed_count) {
            debug!(peer = %self.peer, "reported count {} is numerically below {} - assuming 32-bit rollover",
                reported, inner.client_processed_count);
        }

        let delta = reported.delta_since(inner.client_processed_count);
        debug!(peer = %self.peer, "ack: h={} mine={} buffered={}",
            reported, inner.client_processed_count, inner.unacked.len());

        for _ in 0..delta {
            if inner.unacked.pop_front().is_none() {
                // the peer acknowledged more stanzas than we have buffered - its count is
                //  authoritative, so we stop popping and clamp below
                break;
            }
        }
        inner.client_processed_count = reported;

        trace!(peer = %self.peer, "after ack: mine={} buffered={}",
            inner.client_processed_count, inner.unacked.len());
    }

    /// Sends `failed` in response to a control element that is unexpected at this time,
    ///  e.g. `enable` before resource binding has completed. Before negotiation fixed a
    ///  namespace, the response uses the fallback namespace.
    async fn send_unexpected_error(&self) {
        let namespace = {
            let inner = self.inner.lock().await;
            inner.namespace.clone().unwrap_or_else(|| FALLBACK_NAMESPACE.to_string())
        };
        self.transport.deliver_raw_text(&control_element::failed_text(&namespace)).await;
    }

    /// Re-delivers all unacknowledged stanzas through the router when the session goes
    ///  away, and permanently disables the feature for this session. Message stanzas that
    ///  do not already carry delay metadata are stamped with their buffering time and the
    ///  given origin, at most once per stanza.
    pub async fn on_close(&self, router: &dyn PacketRouter, origin: &PeerAddress) {
        let drained = {
            let mut inner = self.inner.lock().await;
            if !inner.is_enabled() {
                return;
            }
            inner.namespace = None; // permanently disable

            // Take the whole buffer under the lock so no concurrent send can interleave
            //  with the drain. This also leaves the buffer empty, making a second close
            //  (or a late send on a lingering session object) a defined no-op.
            std::mem::take(&mut inner.unacked)
        };

        debug!(peer = %self.peer, "session closed with {} unacknowledged stanzas - redelivering",
            drained.len());

        let origin_bare = origin.bare();
        for mut unacked in drained {
            if unacked.stanza.is_message() && !unacked.stanza.has_delay_stamp() {
                unacked.stanza.apply_delay_stamp(unacked.timestamp, &origin_bare);
            }
            trace!(peer = %self.peer, "redelivering {:?}", unacked.stanza);
            router.route(unacked.stanza).await;
        }
    }
}
