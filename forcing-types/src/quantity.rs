use crate::error::ForcingError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hours in one day of an hourly series.
pub const HOURS_PER_DAY: usize = 24;

/// The forcing quantities produced for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    MajorRiver,
    MinorRiver,
    Wind,
    AirTemperature,
    RelativeHumidity,
    CloudFraction,
}

/// Output record family; each has its own line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    River,
    Wind,
    Meteo,
}

/// Sample spacing of a reconstructed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grid {
    Daily,
    Hourly,
}

impl Grid {
    /// Distance between consecutive samples.
    pub fn step(&self) -> TimeDelta {
        match self {
            Grid::Daily => TimeDelta::days(1),
            Grid::Hourly => TimeDelta::hours(1),
        }
    }

    /// Samples per day, the unit the trimmer removes from the tail.
    pub fn block_len(&self) -> usize {
        match self {
            Grid::Daily => 1,
            Grid::Hourly => HOURS_PER_DAY,
        }
    }
}

impl Quantity {
    /// Meteorological quantities, in output order.
    pub const METEO: [Quantity; 3] = [
        Quantity::AirTemperature,
        Quantity::RelativeHumidity,
        Quantity::CloudFraction,
    ];

    /// Name used in log records and as the series key.
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::MajorRiver => "major river",
            Quantity::MinorRiver => "minor river",
            Quantity::Wind => "wind",
            Quantity::AirTemperature => "air_temperature",
            Quantity::RelativeHumidity => "relative_humidity",
            Quantity::CloudFraction => "cloud_fraction",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Quantity::MajorRiver | Quantity::MinorRiver => Family::River,
            Quantity::Wind => Family::Wind,
            Quantity::AirTemperature | Quantity::RelativeHumidity | Quantity::CloudFraction => {
                Family::Meteo
            }
        }
    }

    pub fn grid(&self) -> Grid {
        match self.family() {
            Family::River => Grid::Daily,
            Family::Wind | Family::Meteo => Grid::Hourly,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Quantity {
    type Err = ForcingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "major_river" | "major" => Ok(Quantity::MajorRiver),
            "minor_river" | "minor" => Ok(Quantity::MinorRiver),
            "wind" => Ok(Quantity::Wind),
            "air_temperature" => Ok(Quantity::AirTemperature),
            "relative_humidity" => Ok(Quantity::RelativeHumidity),
            "cloud_fraction" => Ok(Quantity::CloudFraction),
            _ => Err(ForcingError::UnknownQuantity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("major".parse::<Quantity>().unwrap(), Quantity::MajorRiver);
        assert_eq!("Minor River".parse::<Quantity>().unwrap(), Quantity::MinorRiver);
        assert_eq!("air-temperature".parse::<Quantity>().unwrap(), Quantity::AirTemperature);
        assert!("sea_level".parse::<Quantity>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for quantity in [
            Quantity::MajorRiver,
            Quantity::MinorRiver,
            Quantity::Wind,
            Quantity::AirTemperature,
            Quantity::RelativeHumidity,
            Quantity::CloudFraction,
        ] {
            assert_eq!(quantity.to_string().parse::<Quantity>().unwrap(), quantity);
        }
    }

    #[test]
    fn test_grids() {
        assert_eq!(Quantity::MajorRiver.grid(), Grid::Daily);
        assert_eq!(Quantity::Wind.grid(), Grid::Hourly);
        assert_eq!(Grid::Daily.block_len(), 1);
        assert_eq!(Grid::Hourly.block_len(), 24);
        assert_eq!(Grid::Hourly.step(), TimeDelta::hours(1));
        assert!(Quantity::METEO.iter().all(|q| q.family() == Family::Meteo));
    }
}
