//! Stream adapter: turns a subscription into a wire-frame stream.
//!
//! The consumer loop is a two-armed wait: the next mailbox event or the
//! keepalive timer, whichever fires first. The timer resets after every
//! emitted frame, so keepalives are only sent on genuinely idle
//! streams. The subscription is owned by the stream, so dropping the
//! stream — client disconnect, handler error, task cancellation — tears
//! the connection down through [`Subscription`]'s drop path.

use std::time::Duration;

use futures::stream::Stream;
use tracing::warn;

use studyhub_core::types::ConnectionId;

use crate::event::HubEvent;
use crate::event::codec::{self, EventFrame};
use crate::hub::Subscription;

/// One frame of a live event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFrame {
    /// Initial marker, emitted once when the stream opens. Clients use
    /// it to flip their connection-status indicator.
    Connected {
        /// The connection id assigned to this subscriber.
        connection_id: ConnectionId,
    },
    /// An encoded event pulled from the mailbox, in publish order.
    Event(EventFrame),
    /// Idle-timeout heartbeat keeping intermediaries from closing the
    /// transport.
    Keepalive,
}

/// Adapts a subscription into a stream of wire frames.
///
/// The stream ends when the hub closes the connection (teardown or
/// shutdown). Encoding failures are logged and skipped; a live stream
/// never surfaces an internal error to the client.
pub fn stream_frames<E: HubEvent>(
    mut subscription: Subscription<E>,
    keepalive: Duration,
) -> impl Stream<Item = StreamFrame> {
    async_stream::stream! {
        yield StreamFrame::Connected {
            connection_id: subscription.connection_id,
        };

        loop {
            tokio::select! {
                event = subscription.recv() => match event {
                    Some(event) => match codec::encode(&event) {
                        Ok(frame) => yield StreamFrame::Event(frame),
                        Err(err) => {
                            warn!(
                                conn_id = %subscription.connection_id,
                                error = %err,
                                "Failed to encode event, frame skipped"
                            );
                        }
                    },
                    // Mailbox closed: the hub tore this connection down.
                    None => break,
                },
                _ = tokio::time::sleep(keepalive) => {
                    yield StreamFrame::Keepalive;
                }
            }
        }
        // `subscription` drops here (and on cancellation), invoking
        // EventHub::teardown exactly once per connection.
    }
}
