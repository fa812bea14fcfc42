//! Presets for single-exposure thermal sessions.

use serde::Serialize;

use crate::core::{Intensity, SessionKind};
use crate::error::PlungeError;
use crate::features::timer::PlainConfig;

/// Allowed temperature window in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureRange {
    /// Lowest accepted
    pub min: f64,
    /// Highest accepted
    pub max: f64,
}

impl TemperatureRange {
    /// Whether `value` lies inside the window.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Defaults for one session kind.
#[derive(Debug, Clone, Serialize)]
pub struct ThermalPreset {
    /// Session kind
    pub kind: SessionKind,
    /// Default countdown in seconds
    pub default_duration_secs: u32,
    /// Default target temperature
    pub default_temperature: Option<f64>,
    /// Accepted temperatures
    pub range: Option<TemperatureRange>,
    /// Quick-pick durations in seconds
    pub presets_secs: &'static [u32],
}

impl ThermalPreset {
    /// Build a plain timer configuration from this preset.
    ///
    /// # Errors
    ///
    /// Returns `PlungeError::InvalidInput` when the temperature is outside the
    /// preset range, or `PlungeError::InvalidConfig` for a zero duration.
    pub fn to_config(
        &self,
        duration_secs: Option<u32>,
        temperature: Option<f64>,
        intensity: Option<Intensity>,
    ) -> Result<PlainConfig, PlungeError> {
        let temperature = temperature.or(self.default_temperature);

        if let (Some(temp), Some(range)) = (temperature, self.range) {
            if !range.contains(temp) {
                return Err(PlungeError::InvalidInput(format!(
                    "{} temperature must be between {}°C and {}°C, got {temp}°C",
                    self.kind.display_name(),
                    range.min,
                    range.max
                )));
            }
        }

        Ok(
            PlainConfig::new(duration_secs.unwrap_or(self.default_duration_secs), self.kind)?
                .with_temperature(temperature)
                .with_intensity(intensity),
        )
    }
}

static PRESETS: [ThermalPreset; 5] = [
    ThermalPreset {
        kind: SessionKind::IceBath,
        default_duration_secs: 120,
        default_temperature: Some(12.0),
        range: Some(TemperatureRange { min: 8.0, max: 15.0 }),
        presets_secs: &[60, 120, 180, 300],
    },
    ThermalPreset {
        kind: SessionKind::ColdPlunge,
        default_duration_secs: 90,
        default_temperature: Some(8.0),
        range: Some(TemperatureRange { min: 2.0, max: 10.0 }),
        presets_secs: &[30, 60, 90, 120],
    },
    ThermalPreset {
        kind: SessionKind::Sauna,
        default_duration_secs: 900,
        default_temperature: Some(85.0),
        range: Some(TemperatureRange { min: 70.0, max: 110.0 }),
        presets_secs: &[600, 900, 1200, 1800],
    },
    ThermalPreset {
        kind: SessionKind::Jacuzzi,
        default_duration_secs: 1200,
        default_temperature: Some(38.0),
        range: Some(TemperatureRange { min: 35.0, max: 42.0 }),
        presets_secs: &[900, 1200, 1800, 2400],
    },
    ThermalPreset {
        kind: SessionKind::ContrastTherapy,
        default_duration_secs: 600,
        default_temperature: None,
        range: None,
        presets_secs: &[300, 600, 900, 1200],
    },
];

/// All thermal presets.
#[must_use]
pub fn presets() -> &'static [ThermalPreset] {
    &PRESETS
}

/// Preset for a session kind.
///
/// # Errors
///
/// Returns `PlungeError::NotFound` for kinds without a thermal preset
/// (breathing).
pub fn preset(kind: SessionKind) -> Result<&'static ThermalPreset, PlungeError> {
    PRESETS
        .iter()
        .find(|p| p.kind == kind)
        .ok_or_else(|| PlungeError::NotFound(format!("thermal preset for {kind}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sauna = preset(SessionKind::Sauna).unwrap();
        let config = sauna.to_config(None, None, Some(Intensity::High)).unwrap();
        assert_eq!(config.duration_secs, 900);
        assert_eq!(config.temperature, Some(85.0));
        assert_eq!(config.intensity, Some(Intensity::High));
    }

    #[test]
    fn test_temperature_out_of_range() {
        let ice = preset(SessionKind::IceBath).unwrap();
        assert!(matches!(
            ice.to_config(None, Some(25.0), None),
            Err(PlungeError::InvalidInput(_))
        ));
        assert!(ice.to_config(Some(60), Some(10.0), None).is_ok());
    }

    #[test]
    fn test_breathing_has_no_preset() {
        assert!(preset(SessionKind::Breathing).is_err());
    }
}
