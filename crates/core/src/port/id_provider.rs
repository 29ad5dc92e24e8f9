// Device ID Provider Port

use std::collections::HashMap;
use std::sync::Mutex;

/// Generates unique device ids, one sequence per model.
///
/// Injected rather than process-global so id state is owned by whoever wires
/// the catalog, and tests get fresh sequences for free.
pub trait DeviceIdProvider: Send + Sync {
    /// Next unique id for the given model
    fn next_id(&self, model: &str) -> String;
}

/// Per-model counter provider, producing ids of the form `"{model}-{n}"`
/// with `n` starting at 1.
pub struct ModelSequenceProvider {
    counts: Mutex<HashMap<String, u32>>,
}

impl ModelSequenceProvider {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for ModelSequenceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceIdProvider for ModelSequenceProvider {
    fn next_id(&self, model: &str) -> String {
        let mut counts = self.counts.lock().unwrap_or_else(|p| p.into_inner());
        let count = counts.entry(model.to_string()).or_insert(0);
        *count += 1;
        format!("{}-{}", model, count)
    }
}
