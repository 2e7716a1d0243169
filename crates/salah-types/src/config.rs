//! Calculation methods, juristic and high-latitude choices, and the per-calculation config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SalahError};
use crate::prayer::Prayer;

/// How Maghrib or Isha is placed: by a depression angle or a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Twilight {
    /// Sun depression below the horizon, in degrees.
    Angle(f64),
    /// Minutes after the preceding event (Sunset for Maghrib, Maghrib for Isha).
    Minutes(f64),
}

impl Twilight {
    pub fn is_minutes(&self) -> bool {
        matches!(self, Twilight::Minutes(_))
    }

    pub fn value(&self) -> f64 {
        match *self {
            Twilight::Angle(v) | Twilight::Minutes(v) => v,
        }
    }
}

/// Angles and intervals that define a calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodParams {
    /// Sun depression at Fajr, in degrees.
    pub fajr_angle: f64,
    pub maghrib: Twilight,
    pub isha: Twilight,
}

impl MethodParams {
    pub const fn new(fajr_angle: f64, maghrib: Twilight, isha: Twilight) -> Self {
        Self { fajr_angle, maghrib, isha }
    }

    /// Angle used to size the high-latitude night portion for Isha.
    pub fn isha_portion_angle(&self) -> f64 {
        match self.isha {
            Twilight::Angle(a) => a,
            Twilight::Minutes(_) => 18.0,
        }
    }

    /// Angle used to size the high-latitude night portion for Maghrib.
    pub fn maghrib_portion_angle(&self) -> f64 {
        match self.maghrib {
            Twilight::Angle(a) => a,
            Twilight::Minutes(_) => 4.0,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.fajr_angle.is_finite() || self.fajr_angle <= 0.0 || self.fajr_angle >= 90.0 {
            return Err(SalahError::invalid_config(format!(
                "Fajr angle {} outside (0, 90)",
                self.fajr_angle
            )));
        }
        for (label, twilight) in [("Maghrib", self.maghrib), ("Isha", self.isha)] {
            match twilight {
                Twilight::Angle(a) if !a.is_finite() || a <= 0.0 || a >= 90.0 => {
                    return Err(SalahError::invalid_config(format!(
                        "{label} angle {a} outside (0, 90)"
                    )));
                }
                Twilight::Minutes(m) if !m.is_finite() || m < 0.0 => {
                    return Err(SalahError::invalid_config(format!(
                        "{label} interval {m} must be a non-negative number of minutes"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Institutional conventions for the Fajr and Isha twilight angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Ithna Ashari.
    Jafari,
    /// University of Islamic Sciences, Karachi.
    #[default]
    Karachi,
    /// Islamic Society of North America.
    Isna,
    /// Muslim World League.
    Mwl,
    /// Umm al-Qura, Makkah.
    Makkah,
    /// Egyptian General Authority of Survey.
    Egypt,
    /// Institute of Geophysics, University of Tehran.
    Tehran,
    /// User-supplied [`MethodParams`].
    Custom,
}

impl CalculationMethod {
    pub const ALL: [CalculationMethod; 8] = [
        CalculationMethod::Jafari,
        CalculationMethod::Karachi,
        CalculationMethod::Isna,
        CalculationMethod::Mwl,
        CalculationMethod::Makkah,
        CalculationMethod::Egypt,
        CalculationMethod::Tehran,
        CalculationMethod::Custom,
    ];

    /// Built-in parameters. `Custom` falls back to the MWL angles.
    pub const fn params(self) -> MethodParams {
        use Twilight::{Angle, Minutes};
        match self {
            CalculationMethod::Jafari => MethodParams::new(16.0, Angle(4.0), Angle(14.0)),
            CalculationMethod::Karachi => MethodParams::new(18.0, Minutes(0.0), Angle(18.0)),
            CalculationMethod::Isna => MethodParams::new(15.0, Minutes(0.0), Angle(15.0)),
            CalculationMethod::Mwl => MethodParams::new(18.0, Minutes(0.0), Angle(17.0)),
            CalculationMethod::Makkah => MethodParams::new(18.5, Minutes(0.0), Minutes(90.0)),
            CalculationMethod::Egypt => MethodParams::new(19.5, Minutes(0.0), Angle(17.5)),
            CalculationMethod::Tehran => MethodParams::new(17.7, Angle(4.5), Angle(14.0)),
            CalculationMethod::Custom => MethodParams::new(18.0, Minutes(0.0), Angle(17.0)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CalculationMethod::Jafari => "jafari",
            CalculationMethod::Karachi => "karachi",
            CalculationMethod::Isna => "isna",
            CalculationMethod::Mwl => "mwl",
            CalculationMethod::Makkah => "makkah",
            CalculationMethod::Egypt => "egypt",
            CalculationMethod::Tehran => "tehran",
            CalculationMethod::Custom => "custom",
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculationMethod {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        let key = match key.as_str() {
            "umm_al_qura" | "ummalqura" => "makkah",
            "ithna_ashari" => "jafari",
            other => other,
        };
        CalculationMethod::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| SalahError::invalid_config(format!("Unknown calculation method {s:?}")))
    }
}

/// School of jurisprudence, which fixes the Asr shadow ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Shadow equals object length (also Maliki, Hanbali).
    #[default]
    Shafii,
    /// Shadow twice the object length.
    Hanafi,
}

impl Jurisdiction {
    pub const fn shadow_factor(self) -> f64 {
        match self {
            Jurisdiction::Shafii => 1.0,
            Jurisdiction::Hanafi => 2.0,
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shafii" | "shafi" | "standard" => Ok(Jurisdiction::Shafii),
            "hanafi" => Ok(Jurisdiction::Hanafi),
            _ => Err(SalahError::invalid_config(format!("Unknown jurisdiction {s:?}"))),
        }
    }
}

/// Replacement rule for times the twilight angle cannot reach at high latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighLatitudeRule {
    /// Leave times as computed; undefined times stay undefined.
    None,
    /// Half of the night.
    #[default]
    MidNight,
    /// One seventh of the night.
    OneSeventh,
    /// `angle / 60` of the night.
    AngleBased,
}

impl HighLatitudeRule {
    /// Fraction of the night used for a twilight of `angle` degrees, `None` when no rule applies.
    pub fn night_portion(self, angle: f64) -> Option<f64> {
        match self {
            HighLatitudeRule::None => None,
            HighLatitudeRule::MidNight => Some(1.0 / 2.0),
            HighLatitudeRule::OneSeventh => Some(1.0 / 7.0),
            HighLatitudeRule::AngleBased => Some(angle / 60.0),
        }
    }
}

impl FromStr for HighLatitudeRule {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(HighLatitudeRule::None),
            "midnight" | "mid_night" => Ok(HighLatitudeRule::MidNight),
            "one_seventh" | "oneseventh" => Ok(HighLatitudeRule::OneSeventh),
            "angle_based" | "anglebased" => Ok(HighLatitudeRule::AngleBased),
            _ => Err(SalahError::invalid_config(format!("Unknown high latitude rule {s:?}"))),
        }
    }
}

/// Display format for clock times. Computation always works in 24-hour `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `13:05`
    #[default]
    H24,
    /// `01:05 PM`
    H12Suffix,
    /// `01:05`
    H12NoSuffix,
}

impl FromStr for TimeFormat {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "24h" | "h24" | "time24" => Ok(TimeFormat::H24),
            "12h" | "h12" | "h12_suffix" | "time12" => Ok(TimeFormat::H12Suffix),
            "12h_no_suffix" | "h12_no_suffix" | "time12_no_suffix" => Ok(TimeFormat::H12NoSuffix),
            _ => Err(SalahError::invalid_config(format!("Unknown time format {s:?}"))),
        }
    }
}

/// Largest per-prayer tuning accepted, in minutes either way.
pub const MAX_OFFSET_MINUTES: i32 = 12 * 60;

/// Everything a single calculation reads from user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    pub method: CalculationMethod,
    pub jurisdiction: Jurisdiction,
    pub high_latitude: HighLatitudeRule,
    pub time_format: TimeFormat,
    /// Minutes added to each time, aligned with [`Prayer::ALL`].
    pub offsets: [i32; 7],
    /// Minutes after solar noon for Dhuhr.
    pub dhuhr_minutes: f64,
    /// Parameters used when `method` is [`CalculationMethod::Custom`].
    pub custom_params: Option<MethodParams>,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: CalculationMethod::default(),
            jurisdiction: Jurisdiction::default(),
            high_latitude: HighLatitudeRule::default(),
            time_format: TimeFormat::default(),
            offsets: [0; 7],
            dhuhr_minutes: 0.0,
            custom_params: None,
        }
    }
}

impl CalculationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = jurisdiction;
        self
    }

    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }

    pub fn time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    pub fn offsets(mut self, offsets: [i32; 7]) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn offset(mut self, prayer: Prayer, minutes: i32) -> Self {
        self.offsets[prayer.index()] = minutes;
        self
    }

    pub fn dhuhr_minutes(mut self, minutes: f64) -> Self {
        self.dhuhr_minutes = minutes;
        self
    }

    /// Switches to [`CalculationMethod::Custom`] with the given parameters.
    pub fn custom_params(mut self, params: MethodParams) -> Self {
        self.method = CalculationMethod::Custom;
        self.custom_params = Some(params);
        self
    }

    /// Parameters in effect for this config.
    pub fn method_params(&self) -> MethodParams {
        match (self.method, self.custom_params) {
            (CalculationMethod::Custom, Some(params)) => params,
            (method, _) => method.params(),
        }
    }

    pub fn offset_for(&self, prayer: Prayer) -> i32 {
        self.offsets[prayer.index()]
    }

    /// Checks angles, intervals and offsets for consistency.
    ///
    /// `Custom` without `custom_params` is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.method == CalculationMethod::Custom && self.custom_params.is_none() {
            return Err(SalahError::invalid_config(
                "Custom method requires custom parameters",
            ));
        }
        self.method_params().validate()?;
        if !self.dhuhr_minutes.is_finite() {
            return Err(SalahError::invalid_config("Dhuhr minutes must be finite"));
        }
        for prayer in Prayer::ALL {
            let minutes = self.offset_for(prayer);
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(SalahError::invalid_config(format!(
                    "{prayer} offset {minutes} exceeds {MAX_OFFSET_MINUTES} minutes"
                )));
            }
        }
        Ok(())
    }
}

/// Builder with validation for `CalculationConfig`.
#[derive(Debug, Default)]
pub struct CalculationConfigBuilder {
    method: Option<CalculationMethod>,
    jurisdiction: Option<Jurisdiction>,
    high_latitude: Option<HighLatitudeRule>,
    time_format: Option<TimeFormat>,
    offsets: Option<[i32; 7]>,
    dhuhr_minutes: Option<f64>,
    custom_params: Option<MethodParams>,
}

impl CalculationConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn method(mut self, method: CalculationMethod) -> Self { self.method = Some(method); self }
    pub fn jurisdiction(mut self, j: Jurisdiction) -> Self { self.jurisdiction = Some(j); self }
    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self { self.high_latitude = Some(rule); self }
    pub fn time_format(mut self, format: TimeFormat) -> Self { self.time_format = Some(format); self }
    pub fn offsets(mut self, offsets: [i32; 7]) -> Self { self.offsets = Some(offsets); self }
    pub fn dhuhr_minutes(mut self, minutes: f64) -> Self { self.dhuhr_minutes = Some(minutes); self }
    pub fn custom_params(mut self, params: MethodParams) -> Self { self.custom_params = Some(params); self }

    /// Builds and validates.
    ///
    /// Custom parameters without an explicit method select [`CalculationMethod::Custom`].
    pub fn build(self) -> Result<CalculationConfig> {
        let method = match (self.method, self.custom_params) {
            (Some(method), _) => method,
            (None, Some(_)) => CalculationMethod::Custom,
            (None, None) => CalculationMethod::default(),
        };

        let config = CalculationConfig {
            method,
            jurisdiction: self.jurisdiction.unwrap_or_default(),
            high_latitude: self.high_latitude.unwrap_or_default(),
            time_format: self.time_format.unwrap_or_default(),
            offsets: self.offsets.unwrap_or([0; 7]),
            dhuhr_minutes: self.dhuhr_minutes.unwrap_or(0.0),
            custom_params: self.custom_params,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_defaults() {
        let config = CalculationConfig::new()
            .jurisdiction(Jurisdiction::Hanafi)
            .offset(Prayer::Isha, 3);

        assert_eq!(config.method, CalculationMethod::Karachi);
        assert_eq!(config.jurisdiction, Jurisdiction::Hanafi);
        assert_eq!(config.high_latitude, HighLatitudeRule::MidNight);
        assert_eq!(config.offsets, [0, 0, 0, 0, 0, 0, 3]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_method_table() {
        let makkah = CalculationMethod::Makkah.params();
        assert_eq!(makkah.fajr_angle, 18.5);
        assert_eq!(makkah.isha, Twilight::Minutes(90.0));
        assert_eq!(makkah.isha_portion_angle(), 18.0);

        let tehran = CalculationMethod::Tehran.params();
        assert_eq!(tehran.maghrib, Twilight::Angle(4.5));
        assert_eq!(tehran.maghrib_portion_angle(), 4.5);
        assert_eq!(CalculationMethod::Karachi.params().maghrib_portion_angle(), 4.0);
    }

    #[test]
    fn test_custom_params_switch_method() {
        let params = MethodParams::new(12.0, Twilight::Minutes(3.0), Twilight::Angle(12.0));
        let config = CalculationConfig::new().custom_params(params);
        assert_eq!(config.method, CalculationMethod::Custom);
        assert_eq!(config.method_params(), params);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_without_params_is_invalid() {
        let err = CalculationConfig::new()
            .method(CalculationMethod::Custom)
            .validate()
            .unwrap_err();
        assert!(matches!(err, SalahError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        let bad_angle = MethodParams::new(95.0, Twilight::Minutes(0.0), Twilight::Angle(17.0));
        assert!(CalculationConfigBuilder::new().custom_params(bad_angle).build().is_err());

        let bad_interval = MethodParams::new(18.0, Twilight::Minutes(-1.0), Twilight::Angle(17.0));
        assert!(CalculationConfigBuilder::new().custom_params(bad_interval).build().is_err());

        assert!(CalculationConfigBuilder::new()
            .offsets([0, 0, 0, 0, 0, 0, 721])
            .build()
            .is_err());
        assert!(CalculationConfigBuilder::new()
            .method(CalculationMethod::Custom)
            .build()
            .is_err());
        assert!(CalculationConfigBuilder::new().dhuhr_minutes(f64::NAN).build().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("ISNA".parse::<CalculationMethod>().unwrap(), CalculationMethod::Isna);
        assert_eq!("umm_al_qura".parse::<CalculationMethod>().unwrap(), CalculationMethod::Makkah);
        assert_eq!("Hanafi".parse::<Jurisdiction>().unwrap(), Jurisdiction::Hanafi);
        assert_eq!("one-seventh".parse::<HighLatitudeRule>().unwrap(), HighLatitudeRule::OneSeventh);
        assert_eq!("12h".parse::<TimeFormat>().unwrap(), TimeFormat::H12Suffix);
        assert!(matches!(
            "sunni".parse::<Jurisdiction>(),
            Err(SalahError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_night_portion() {
        assert_eq!(HighLatitudeRule::None.night_portion(18.0), None);
        assert_eq!(HighLatitudeRule::MidNight.night_portion(18.0), Some(0.5));
        assert_eq!(HighLatitudeRule::AngleBased.night_portion(18.0), Some(0.3));
    }

    #[test]
    fn test_config_json_defaults() {
        let config: CalculationConfig =
            serde_json::from_str(r#"{"method":"mwl","high_latitude":"angle_based"}"#).unwrap();
        assert_eq!(config.method, CalculationMethod::Mwl);
        assert_eq!(config.high_latitude, HighLatitudeRule::AngleBased);
        assert_eq!(config.jurisdiction, Jurisdiction::Shafii);
    }
}
