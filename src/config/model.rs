// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Optional settings file (`brolly.toml` in the configuration directory).
///
/// ```toml
/// [timer]
/// initial_delay_secs = 5
/// period_secs = 3600
///
/// [job]
/// script = "run.sh"
/// ```
///
/// Every section and field is optional; a missing file means defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub timer: TimerSection,

    #[serde(default)]
    pub job: JobSection,
}

/// `[timer]` section: when and how often the scheduled run fires.
///
/// These are tunables, not correctness constants; the single-flight guard
/// holds for any values.
#[derive(Debug, Clone, Deserialize)]
pub struct TimerSection {
    /// Seconds until the first scheduled run after startup.
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Seconds between scheduled runs thereafter.
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
}

fn default_initial_delay_secs() -> u64 {
    5
}

fn default_period_secs() -> u64 {
    3600
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            initial_delay_secs: default_initial_delay_secs(),
            period_secs: default_period_secs(),
        }
    }
}

impl TimerSection {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

/// `[job]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct JobSection {
    /// File name of the backup script inside the configuration directory.
    #[serde(default = "default_script")]
    pub script: String,
}

fn default_script() -> String {
    "run.sh".to_string()
}

impl Default for JobSection {
    fn default() -> Self {
        Self {
            script: default_script(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.timer.initial_delay_secs, 5);
        assert_eq!(settings.timer.period_secs, 3600);
        assert_eq!(settings.job.script, "run.sh");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [timer]
            period_secs = 600
            "#,
        )
        .unwrap();
        assert_eq!(settings.timer.initial_delay_secs, 5);
        assert_eq!(settings.timer.period_secs, 600);
        assert_eq!(settings.job.script, "run.sh");
    }
}
