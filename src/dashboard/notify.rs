//! User-facing alerts

/// Puts a message in front of the user
pub trait Notifier: Send + Sync {
    /// Show a blocking alert
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        eprintln!();
        eprintln!("! {}", message.replace('\n', "\n  "));
        eprintln!();
    }
}

/// Keeps alerts in memory, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    alerts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
