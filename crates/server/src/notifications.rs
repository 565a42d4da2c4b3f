//! In-process notification bus.
//!
//! Handlers publish short user-facing notices after a mutation; clients follow them over
//! server-sent events at `/notifications`. A [`Subscription`] unsubscribes when dropped and
//! ends once the notifier is closed, so open streams do not hold up shutdown.

use futures::Stream;
use log::warn;
use serde::Serialize;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::{
    broadcast::{self, error::RecvError},
    watch,
};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Fan-out of notices to every live subscriber
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
    next_id: Arc<AtomicU64>,
    closed: Arc<watch::Sender<bool>>,
}

impl Notifier {
    /// `capacity` bounds how far a subscriber may fall behind before it skips notices
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        let (closed, _) = watch::channel(false);
        Self {
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
            closed: Arc::new(closed),
        }
    }

    /// Sends a notice to current subscribers and returns how many received it
    pub fn publish(&self, kind: NoticeKind, message: impl Into<String>) -> usize {
        let notice = Notice {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        };
        // Sending only fails when nobody is listening
        self.sender.send(notice).unwrap_or(0)
    }

    pub fn success(&self, message: impl Into<String>) -> usize {
        self.publish(NoticeKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> usize {
        self.publish(NoticeKind::Error, message)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            closed: self.closed.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Ends every subscription once it has drained the notices already sent
    pub fn close(&self) {
        self.closed.send_replace(true);
    }
}

pub struct Subscription {
    receiver: broadcast::Receiver<Notice>,
    closed: watch::Receiver<bool>,
}

impl Subscription {
    /// Waits for the next notice. Returns `None` once the notifier is closed or gone.
    pub async fn next(&mut self) -> Option<Notice> {
        loop {
            tokio::select! {
                biased;
                received = self.receiver.recv() => match received {
                    Ok(notice) => return Some(notice),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Notification subscriber fell behind, skipped {skipped} notices");
                    }
                    Err(RecvError::Closed) => return None,
                },
                _ = self.closed.wait_for(|closed| *closed) => return None,
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Notice> {
        futures::stream::unfold(self, |mut subscription| async move {
            subscription
                .next()
                .await
                .map(|notice| (notice, subscription))
        })
    }
}
