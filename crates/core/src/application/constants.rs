// Application constants (no magic values in the drivers)
use std::time::Duration;

/// Period of the metrics simulation driver (10s)
pub const SIMULATION_INTERVAL: Duration = Duration::from_secs(10);

/// Period of the low-memory recovery sweep (10s)
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Free-memory floor below which the recovery sweep tops a device up (MB)
pub const LOW_MEMORY_FLOOR_MB: u64 = 500;

/// Fixed free-memory top-up applied by the recovery sweep (MB)
pub const MEMORY_RECOVERY_STEP_MB: u64 = 100;

/// Per-tick free-memory drain cap for booked devices: 5% of total memory
pub const MAX_MEMORY_DRAIN_RATIO: f64 = 0.05;

/// Per-tick battery drain cap for booked devices: 2% of current level
pub const MAX_BATTERY_DRAIN_RATIO: f64 = 0.02;

/// Priority rank below which a user may book via the priority strategy
pub const PRIORITY_THRESHOLD: u32 = 10;

/// Buffered capacity of the device-added event channel
pub const DEVICE_EVENT_CAPACITY: usize = 16;
