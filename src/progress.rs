use std::sync::mpsc::{Receiver, Sender};
use std::sync::Mutex;

use crate::error::ClientDisconnected;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    /// Human-readable status line.
    Label(String),
    /// A single deduplicated component, serialized as CycloneDX JSON.
    Detection(String),
}

pub trait ProgressSink: Send + Sync {
    fn send(&self, message: ProgressMessage) -> Result<(), ClientDisconnected>;

    fn label(&self, text: impl Into<String>) -> Result<(), ClientDisconnected>
    where
        Self: Sized,
    {
        self.send(ProgressMessage::Label(text.into()))
    }
}

/// Forwards messages over an mpsc channel. Once the receiving half is
/// dropped every send fails with [`ClientDisconnected`].
pub struct ChannelProgressSink {
    sender: Mutex<Sender<ProgressMessage>>,
}

impl ChannelProgressSink {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }

    pub fn channel() -> (Self, Receiver<ProgressMessage>) {
        let (tx, rx) = std::sync::mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl ProgressSink for ChannelProgressSink {
    fn send(&self, message: ProgressMessage) -> Result<(), ClientDisconnected> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        sender.send(message).map_err(|_| ClientDisconnected)
    }
}

/// Sends a label through an optional sink.
pub(crate) fn send_label(
    sink: Option<&dyn ProgressSink>,
    text: impl Into<String>,
) -> Result<(), ClientDisconnected> {
    match sink {
        Some(sink) => sink.send(ProgressMessage::Label(text.into())),
        None => Ok(()),
    }
}
