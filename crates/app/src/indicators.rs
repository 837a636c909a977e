//! Indicator channel names.

/// Hardware channels used to signal process and controller state.
///
/// The system indicator is raised once when the loop starts; the controller
/// indicator mirrors `controller.enabled` and is rewritten on every
/// controller merge.
#[derive(Debug, Clone)]
pub struct IndicatorChannels {
    pub system: String,
    pub controller: String,
}

impl Default for IndicatorChannels {
    fn default() -> Self {
        Self {
            system: "system-indicator".to_string(),
            controller: "controller-indicator".to_string(),
        }
    }
}
