// FIXME: Enable `deny(missing_docs)` before release
//#![deny(missing_docs)]

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

use std::{error::Error as StdError, fmt, future::Future, pin::Pin};

use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::{
    broadcast,
    mpsc::{self, error::SendError},
    oneshot,
};

// ------ -------
//  Plugin shape
// ------ -------

#[allow(missing_debug_implementations)]
pub struct PluginContainer<M, E> {
    pub ports: PluginPorts<M, E>,
    pub message_loop: MessageLoop,
}

pub type MessageLoop = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

#[allow(missing_debug_implementations)]
pub struct PluginPorts<M, E> {
    pub message_tx: MessageSender<M>,
    pub event_subscriber: EventSubscriber<E>,
}

#[derive(Error, Debug)]
pub enum PluginError<E: StdError> {
    #[error("communication error")]
    Communication,

    #[error("internal error: {0}")]
    Internal(E),
}

pub type PluginResult<T, E> = Result<T, PluginError<E>>;

// ------ -------
//   Messages
// ------ -------

// TODO: Use bounded channels for backpressure?
pub type MessageSender<T> = mpsc::UnboundedSender<T>;
pub type MessageReceiver<T> = mpsc::UnboundedReceiver<T>;

#[must_use]
pub fn message_channel<T>() -> (MessageSender<T>, MessageReceiver<T>) {
    mpsc::unbounded_channel()
}

// ------ -------
// Reply messages
// ------ -------

pub type ReplySender<T> = oneshot::Sender<T>;
pub type ReplyReceiver<T> = oneshot::Receiver<T>;

#[must_use]
pub fn reply_channel<T>() -> (ReplySender<T>, ReplyReceiver<T>) {
    oneshot::channel()
}

pub type ResultSender<T, E> = ReplySender<Result<T, E>>;
pub type ResultReceiver<T, E> = ReplyReceiver<Result<T, E>>;

pub fn send_reply<R>(reply_tx: ReplySender<R>, reply: R)
where
    R: fmt::Debug,
{
    if let Err(reply) = reply_tx.send(reply) {
        // Not an error, the receiver may have been dropped intentionally
        log::debug!("Reply {:?} not delivered", reply);
    }
}

pub async fn receive_reply<R>(reply_rx: ReplyReceiver<R>) -> Result<R, oneshot::error::RecvError> {
    reply_rx.await.map_err(|err| {
        log::warn!("No reply received: {}", err);
        err
    })
}

pub async fn send_message_receive_result<M, T, E>(
    message: impl Into<M>,
    message_tx: &MessageSender<M>,
    reply_rx: ResultReceiver<T, E>,
) -> PluginResult<T, E>
where
    M: fmt::Debug,
    E: StdError,
{
    message_tx.send(message.into()).map_err(|SendError(message)| {
        log::warn!("Failed to send message {:?}", message);
        PluginError::Communication
    })?;
    receive_reply(reply_rx)
        .await
        .map_err(|_| PluginError::Communication)?
        .map_err(PluginError::Internal)
}

// ------ -------
//  Broadcasting
// ------ -------

pub type BroadcastSender<T> = broadcast::Sender<T>;
pub type BroadcastReceiver<T> = broadcast::Receiver<T>;

#[derive(Debug, Clone)]
pub struct BroadcastSubscriber<T> {
    sender: BroadcastSender<T>,
}

impl<T> BroadcastSubscriber<T> {
    #[must_use]
    pub const fn new(sender: BroadcastSender<T>) -> Self {
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> BroadcastReceiver<T> {
        self.sender.subscribe()
    }
}

#[must_use]
pub fn broadcast_channel<T>(channel_capacity: usize) -> (BroadcastSender<T>, BroadcastSubscriber<T>)
where
    T: Clone,
{
    let (tx, _) = broadcast::channel(channel_capacity);
    let subscriber = BroadcastSubscriber::new(tx.clone());
    (tx, subscriber)
}

// ----- ------
//    Events
// ----- ------

/// Identifies the publisher of an event within the application
pub type EventPublisherId = &'static str;

/// Who published an event and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub publisher: EventPublisherId,
    pub at: OffsetDateTime,
}

impl Published {
    #[must_use]
    pub fn now(publisher: EventPublisherId) -> Self {
        Self {
            publisher,
            at: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublishedEvent<T> {
    pub published: Published,
    pub payload: T,
}

pub type EventSender<T> = broadcast::Sender<PublishedEvent<T>>;
pub type EventReceiver<T> = broadcast::Receiver<PublishedEvent<T>>;
pub type EventSubscriber<T> = BroadcastSubscriber<PublishedEvent<T>>;

#[must_use]
pub fn event_channel<T>(channel_capacity: usize) -> (EventSender<T>, EventSubscriber<T>)
where
    T: Clone,
{
    broadcast_channel(channel_capacity)
}

#[derive(Debug, Clone)]
pub struct EventPubSub<E> {
    publisher: EventPublisherId,
    event_tx: EventSender<E>,
}

impl<T> EventPubSub<T>
where
    T: fmt::Debug + Clone,
{
    #[must_use]
    pub fn new(publisher: EventPublisherId, channel_capacity: usize) -> (Self, EventSubscriber<T>) {
        let (event_tx, event_subscriber) = event_channel(channel_capacity);
        (
            Self {
                publisher,
                event_tx,
            },
            event_subscriber,
        )
    }

    pub fn publish_event(&self, payload: T) {
        let published = Published::now(self.publisher);
        let event = PublishedEvent { published, payload };
        self.dispatch_event(event);
    }
}

pub trait EventDispatcher<E> {
    fn dispatch_event(&self, event: E);
}

impl<T> EventDispatcher<PublishedEvent<T>> for EventPubSub<T>
where
    T: fmt::Debug + Clone,
{
    fn dispatch_event(&self, event: PublishedEvent<T>) {
        if let Err(event) = self.event_tx.send(event) {
            // Ignore all send errors that are expected if no subscribers
            // are connected.
            log::debug!("No subscribers for published event {:?}", event);
        }
    }
}
