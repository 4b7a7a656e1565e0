//! This crate implements a reliable-delivery extension for a stateful, bidirectional, ordered
//!  session protocol: the server proves to a connected peer how many outbound stanzas the peer
//!  has durably received, and the peer proves how many inbound stanzas the server has processed,
//!  so that a brief transport interruption does not silently lose data.
//!
//! ## Design goals
//!
//! * One instance per live session, driven concurrently by the session's outbound send path,
//!    its inbound control-element path and a close path triggered by transport teardown
//!   * a single exclusive lock per instance guards all counter and buffer mutations as a group
//!   * the actual transport write happens outside that lock, so a slow peer never blocks
//!      counter bookkeeping. The count reported in an ack may race a concurrent increment,
//!      which is fine since a later ack simply reports the larger value
//! * The feature is off until the peer negotiates it on, and negotiation is gated on the peer
//!    having completed resource binding
//! * Counters are 32-bit and wrap around, so 0 follows after FFFFFFFF. All comparisons use
//!    modulo arithmetic
//! * Outbound stanzas are buffered as deep copies until the peer acknowledges them, in send
//!    order. There is no retry timer while the session is open: unacknowledged stanzas are
//!    handed back to the routing layer exactly once, when the session closes, annotated with
//!    delay-of-delivery metadata so downstream consumers can tell they were not delivered live
//!
//! ## Control elements
//!
//! Control elements travel over the session's regular stanza channel. Their namespace is
//!  whichever of the two supported protocol revisions was negotiated.
//!
//! ```ascii
//! peer   -> server   <enable xmlns='NS'/>          negotiate the feature on
//! server -> peer     <enabled xmlns='NS'/>         confirmation
//! peer   -> server   <r xmlns='NS'/>               "report your processed count"
//! server -> peer     <a xmlns='NS' h='N'/>         ack: N = server-processed count mod 2^32
//! peer   -> server   <a xmlns='NS' h='N'/>         ack: N = peer-processed count mod 2^32
//! server -> peer     <failed xmlns='NS'>...</failed>  protocol violation (unexpected-request)
//! ```
//!
//! The server also sends `<r/>` proactively every `request_frequency` outbound stanzas
//!  (see [AckConfig]).
//!
//! No inbound element is fatal to the enclosing session: protocol violations are answered
//!  with `failed`, malformed acks are discarded with state left unchanged, and control
//!  elements arriving while the feature is disabled are silently absorbed.

mod ack_manager;
mod config;
mod control_element;
mod peer_address;
mod router;
mod seq_no;
mod stanza;
mod transport;

pub use ack_manager::{AckManager, UnackedPacket};
pub use config::AckConfig;
pub use control_element::{ControlElement, FALLBACK_NAMESPACE, NAMESPACE_V2, NAMESPACE_V3};
pub use peer_address::PeerAddress;
pub use router::PacketRouter;
pub use seq_no::SeqNo;
pub use stanza::Stanza;
pub use transport::SessionTransport;

#[cfg(test)]
mod test_util;
