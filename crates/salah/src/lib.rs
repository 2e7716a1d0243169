//! # Salah
//!
//! Islamic prayer times for any date and place: the seven canonical times from solar angles,
//! the voluntary Tahajjud, Ishraq and Duha times derived from them, and the UTC offset
//! resolution that feeds the calculation.
//!
//! This crate is a facade that re-exports the `salah` workspace crates.
//!
//! ## Modules
//!
//! - `types`: Core types (GeoCoordinate, CalculationConfig, PrayerTimeSet, SalahError, ...)
//! - `astronomy`: Solar position and prayer time calculation
//! - `voluntary`: Voluntary prayer derivation
//! - `clock`: Time-of-day arithmetic and display formats
//! - `timezone`: Offset resolution from device clocks, zone names and countries
//!
//! ## Usage
//!
//! ```rust
//! use salah::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let karachi = GeoCoordinate::new(24.8607, 67.0011).unwrap();
//! let request = CalculationRequest::new(
//!     date,
//!     karachi,
//!     LocationSource::Manual { zone_name: "Asia/Karachi".into() },
//! );
//!
//! let mut ctx = CalculationContext::default();
//! let day = calculate(&mut ctx, &request, &TimezoneResolver::new()).unwrap();
//! assert_eq!(day.prayers.canonical(Prayer::Fajr), "05:25");
//! ```

pub use salah_core::*;
