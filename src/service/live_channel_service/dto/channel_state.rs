///
/// Connection lifecycle of the live channel. One tagged state instead
/// of a set of booleans, so "connecting while connected" cannot be
/// expressed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Disconnected,
    Connecting,
    Connected,
    /// Waiting out the backoff before reconnect attempt `attempt`.
    Reconnecting { attempt: u32 },
    /// Retry budget exhausted; only a fresh `connect()` leaves this state.
    Abandoned,
}
