// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Outbound notifications
//
// Notifications are fire-and-forget. A failed send is logged and replaced
// by a haptic nudge, never reported back to the caller.

use crate::types::AppError;
use async_channel::{Receiver, Sender, TrySendError};

/// A user-visible notification
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

impl Notification {
    /// The celebration shown after a simulated adoption
    pub fn adopted(pet_name: &str) -> Self {
        Self {
            title: "Adoption Success!".to_string(),
            body: format!("{} has found a loving forever home!", pet_name),
            data: serde_json::json!({ "petName": pet_name }),
        }
    }
}

/// Tactile feedback levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Light,
    Medium,
    Heavy,
    Success,
}

/// Platform notification and haptics sink
pub trait Notifier: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), AppError>;
    fn haptic(&self, feedback: Haptic);
}

/// Send `notification`, falling back to a medium haptic if delivery fails.
///
/// Returns whether the notification was delivered.
pub fn dispatch(notifier: &dyn Notifier, notification: Notification) -> bool {
    match notifier.send(notification) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Notification error: {}", e);
            notifier.haptic(Haptic::Medium);
            false
        }
    }
}

/// Events delivered to a frontend listener
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Notification(Notification),
    Haptic(Haptic),
}

/// Notifier that forwards events over a channel to whoever renders them
#[derive(Clone)]
pub struct ChannelNotifier {
    tx: Sender<AppEvent>,
}

impl ChannelNotifier {
    pub fn unbounded() -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = async_channel::unbounded();
        (Self { tx }, rx)
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = async_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn send(&self, notification: Notification) -> Result<(), AppError> {
        self.tx
            .try_send(AppEvent::Notification(notification))
            .map_err(|e| match e {
                TrySendError::Full(_) => AppError::Notification("queue full".to_string()),
                TrySendError::Closed(_) => AppError::Notification("listener closed".to_string()),
            })
    }

    fn haptic(&self, feedback: Haptic) {
        if self.tx.try_send(AppEvent::Haptic(feedback)).is_err() {
            tracing::debug!("Dropped haptic {:?}", feedback);
        }
    }
}
