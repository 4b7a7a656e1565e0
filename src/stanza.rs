use std::fmt::Debug;
use std::time::SystemTime;

/// The capabilities this crate needs from the session's stanza object model. The actual
///  model (XML tree, serialization, addressing) lives with the surrounding session.
pub trait Stanza: Debug + Send + Sync + 'static {
    /// An independent deep copy. The buffered copy must not be affected by later mutation
    ///  of the live object, whose lifetime ends with the caller.
    fn deep_copy(&self) -> Box<dyn Stanza>;

    /// True iff this is a message-type stanza. Only messages are annotated with delay
    ///  metadata on redelivery.
    fn is_message(&self) -> bool;

    fn has_delay_stamp(&self) -> bool;

    /// Attaches delay-of-delivery metadata: the instant the stanza was originally buffered
    ///  for sending, and the bare address it is redelivered on behalf of. How the stamp is
    ///  formatted on the wire is the stanza model's concern.
    fn apply_delay_stamp(&mut self, stamp: SystemTime, from: &str);
}
