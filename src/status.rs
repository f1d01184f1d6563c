// Status sink
// One-way, fire-and-forget surface for operation results. The engine and
// the dispatcher talk to it; the UI decides how to show the message.

use std::sync::mpsc;

pub trait StatusSink: Send + Sync {
    fn show_info(&self, message: &str);
    fn show_error(&self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct StatusNote {
    pub level: StatusLevel,
    pub text: String,
}

/// Forwards notes from the key-source thread to the UI over a channel.
/// Sends are best-effort; a closed receiver just drops the note.
pub struct ChannelSink {
    tx: mpsc::Sender<StatusNote>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<StatusNote>) {
        let (tx, rx) = mpsc::channel();
        (ChannelSink { tx }, rx)
    }
}

impl StatusSink for ChannelSink {
    fn show_info(&self, message: &str) {
        let _ = self.tx.send(StatusNote {
            level: StatusLevel::Info,
            text: message.to_string(),
        });
    }

    fn show_error(&self, message: &str) {
        log::warn!("{message}");
        let _ = self.tx.send(StatusNote {
            level: StatusLevel::Error,
            text: message.to_string(),
        });
    }
}
