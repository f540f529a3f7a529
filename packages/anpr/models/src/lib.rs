#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Vocabulary types for the ANPR journey survey.
//!
//! This crate defines the two closed enumerations that appear throughout
//! the system: the vehicle classification scheme used by the survey
//! spreadsheets and the compass/gate directions recorded at each camera.
//! The string spellings are canonical — they are what the spreadsheets
//! contain and what the database stores.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Vehicle classification as recorded by the survey contractor.
///
/// The spellings match the spreadsheet class column exactly, including
/// the underscore in `Bus_Coach` and the `<3.5T` suffix on light goods
/// vehicles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum VehicleClass {
    /// Buses and coaches
    #[strum(serialize = "Bus_Coach")]
    #[serde(rename = "Bus_Coach")]
    BusCoach,
    /// Private cars
    #[strum(serialize = "Car")]
    #[serde(rename = "Car")]
    Car,
    /// Light goods vehicles under 3.5 tonnes
    #[strum(serialize = "LGV<3.5T")]
    #[serde(rename = "LGV<3.5T")]
    Lgv,
    /// Motorcycles
    #[strum(serialize = "Motorcycle")]
    #[serde(rename = "Motorcycle")]
    Motorcycle,
    /// Rigid goods vehicles (OGV1)
    #[strum(serialize = "OGV1")]
    #[serde(rename = "OGV1")]
    Ogv1,
    /// Articulated goods vehicles (OGV2)
    #[strum(serialize = "OGV2")]
    #[serde(rename = "OGV2")]
    Ogv2,
    /// Vehicles not fitting any other class
    #[strum(serialize = "Other")]
    #[serde(rename = "Other")]
    Other,
    /// Taxis
    #[strum(serialize = "Taxi")]
    #[serde(rename = "Taxi")]
    Taxi,
}

impl VehicleClass {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::BusCoach,
            Self::Car,
            Self::Lgv,
            Self::Motorcycle,
            Self::Ogv1,
            Self::Ogv2,
            Self::Other,
            Self::Taxi,
        ]
    }
}

/// Direction of travel past a camera.
///
/// Road-side cameras record compass directions; car-park and site-gate
/// cameras record `IN`/`OUT`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    /// Northbound
    N,
    /// Southbound
    S,
    /// Eastbound
    E,
    /// Westbound
    W,
    /// Entering a gated site
    In,
    /// Leaving a gated site
    Out,
}

impl Direction {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::N, Self::S, Self::E, Self::W, Self::In, Self::Out]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_class_display_roundtrip() {
        for class in VehicleClass::all() {
            let text = class.to_string();
            let parsed: VehicleClass = text.parse().unwrap();
            assert_eq!(parsed, *class, "{text} did not round-trip");
        }
    }

    #[test]
    fn vehicle_class_spreadsheet_spellings() {
        assert_eq!(VehicleClass::BusCoach.to_string(), "Bus_Coach");
        assert_eq!(VehicleClass::Lgv.to_string(), "LGV<3.5T");
        assert_eq!(VehicleClass::Ogv1.to_string(), "OGV1");
        assert_eq!("Taxi".parse::<VehicleClass>().unwrap(), VehicleClass::Taxi);
    }

    #[test]
    fn rejects_unknown_vehicle_class() {
        assert!("Bicycle".parse::<VehicleClass>().is_err());
        assert!("car".parse::<VehicleClass>().is_err());
    }

    #[test]
    fn direction_display_roundtrip() {
        for dir in Direction::all() {
            let text = dir.to_string();
            let parsed: Direction = text.parse().unwrap();
            assert_eq!(parsed, *dir, "{text} did not round-trip");
        }
    }

    #[test]
    fn direction_uppercase_spellings() {
        assert_eq!(Direction::In.to_string(), "IN");
        assert_eq!(Direction::Out.to_string(), "OUT");
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::W);
        assert!("NE".parse::<Direction>().is_err());
    }
}
