// Device Events - in-process notification channel

use crate::application::constants::DEVICE_EVENT_CAPACITY;
use crate::domain::Device;
use tokio::sync::broadcast;

/// Signals emitted when the device pool changes
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A new device was created and persisted
    Added(Device),
}

pub type DeviceEventSender = broadcast::Sender<DeviceEvent>;
pub type DeviceEventReceiver = broadcast::Receiver<DeviceEvent>;

/// Create the device-event channel. Senders are cheap to clone; each
/// consumer subscribes for its own receiver.
pub fn device_event_channel() -> (DeviceEventSender, DeviceEventReceiver) {
    broadcast::channel(DEVICE_EVENT_CAPACITY)
}
