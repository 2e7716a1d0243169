//! Decoding of the preference codes stored by the mobile settings screen.

use salah_types::{
    CalculationConfig, CalculationMethod, HighLatitudeRule, Jurisdiction, Result, TimeFormat,
};
use serde::{Deserialize, Serialize};

/// Raw preference values as persisted by the settings screen.
///
/// Each field holds the list-preference code (`"0"`, `"1"`, ...). Absent fields fall back to the
/// config defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredPreferences {
    /// `"0"` Hanafi, anything else Shafii.
    pub school: Option<String>,
    /// `"0"` none, `"1"` one seventh, `"2"` midnight, anything else angle based.
    pub latitude_adjustment: Option<String>,
    /// `"0"` 12-hour with AM/PM, `"1"` 24-hour, anything else 12-hour without suffix.
    pub time_format: Option<String>,
    /// Method name such as `"karachi"`. Karachi when absent.
    pub calculation_method: Option<String>,
}

impl StoredPreferences {
    /// # Errors
    /// `InvalidConfiguration` for an unknown method name.
    pub fn to_config(&self) -> Result<CalculationConfig> {
        let mut config = CalculationConfig::default();
        if let Some(method) = &self.calculation_method {
            config = config.method(method.parse::<CalculationMethod>()?);
        }
        if let Some(code) = &self.school {
            config = config.jurisdiction(decode_school(code));
        }
        if let Some(code) = &self.latitude_adjustment {
            config = config.high_latitude(decode_latitude_adjustment(code));
        }
        if let Some(code) = &self.time_format {
            config = config.time_format(decode_time_format(code));
        }
        config.validate()?;
        Ok(config)
    }

    /// Codes that decode back to `config`'s method, jurisdiction, rule and format.
    pub fn from_config(config: &CalculationConfig) -> Self {
        let school = match config.jurisdiction {
            Jurisdiction::Hanafi => "0",
            Jurisdiction::Shafii => "1",
        };
        let latitude_adjustment = match config.high_latitude {
            HighLatitudeRule::None => "0",
            HighLatitudeRule::OneSeventh => "1",
            HighLatitudeRule::MidNight => "2",
            HighLatitudeRule::AngleBased => "3",
        };
        let time_format = match config.time_format {
            TimeFormat::H12Suffix => "0",
            TimeFormat::H24 => "1",
            TimeFormat::H12NoSuffix => "2",
        };
        Self {
            school: Some(school.into()),
            latitude_adjustment: Some(latitude_adjustment.into()),
            time_format: Some(time_format.into()),
            calculation_method: Some(config.method.name().into()),
        }
    }
}

pub fn decode_school(code: &str) -> Jurisdiction {
    match code.trim() {
        "0" => Jurisdiction::Hanafi,
        _ => Jurisdiction::Shafii,
    }
}

pub fn decode_latitude_adjustment(code: &str) -> HighLatitudeRule {
    match code.trim() {
        "0" => HighLatitudeRule::None,
        "1" => HighLatitudeRule::OneSeventh,
        "2" => HighLatitudeRule::MidNight,
        _ => HighLatitudeRule::AngleBased,
    }
}

pub fn decode_time_format(code: &str) -> TimeFormat {
    match code.trim() {
        "0" => TimeFormat::H12Suffix,
        "1" => TimeFormat::H24,
        _ => TimeFormat::H12NoSuffix,
    }
}
