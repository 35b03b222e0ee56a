//! Per-quantity extraction of values from hourly climate records.

use chrono::Datelike;
use forcing_types::{
    category_mapping::CategoryMapping, raw::ClimateRecord, Quantity, Scalar, WindComponents,
};
use log::warn;

/// Cloud fraction used for weather descriptions missing from the mapping.
pub const UNKNOWN_WEATHER_CLOUD_FRACTION: f64 = 10.0;

const KMH_TO_MS: f64 = 1.0 / 3.6;

/// Air temperature in tenths of a degree Celsius.
pub fn air_temperature(record: &ClimateRecord) -> Scalar {
    record.temperature.map(|t| t * 10.0)
}

/// Relative humidity in percent.
pub fn relative_humidity(record: &ClimateRecord) -> Scalar {
    record.humidity
}

/// Cloud fraction (tenths of sky) for the record's weather description.
pub fn cloud_fraction(record: &ClimateRecord, mapping: &CategoryMapping) -> Scalar {
    let description = record.weather.as_deref()?;
    match mapping.lookup(description, record.timestamp.month()) {
        Some(value) => Some(value),
        None => {
            warn!(
                "Unrecognized weather description: {}; cloud fraction set to 10",
                description
            );
            Some(UNKNOWN_WEATHER_CLOUD_FRACTION)
        }
    }
}

/// Reader for one of the scalar meteorological quantities.
pub fn meteo_value(quantity: Quantity, record: &ClimateRecord, mapping: &CategoryMapping) -> Scalar {
    match quantity {
        Quantity::AirTemperature => air_temperature(record),
        Quantity::RelativeHumidity => relative_humidity(record),
        Quantity::CloudFraction => cloud_fraction(record, mapping),
        Quantity::MajorRiver | Quantity::MinorRiver | Quantity::Wind => None,
    }
}

/// Orientation of the wind component axes.
///
/// With no rotation the components are east (u) and north (v). A rotation
/// turns the axes counter-clockwise by `rotation_deg`, e.g. to align v with
/// the axis of a strait.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindAxes {
    pub rotation_deg: f64,
}

impl WindAxes {
    pub fn rotated(rotation_deg: f64) -> Self {
        WindAxes { rotation_deg }
    }

    fn apply(&self, u: f64, v: f64) -> (f64, f64) {
        if self.rotation_deg == 0.0 {
            return (u, v);
        }
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        (u * cos + v * sin, -u * sin + v * cos)
    }
}

/// Wind velocity components in m/s from speed (km/h) and the direction the
/// wind blows from (tens of degrees).
pub fn wind_components(record: &ClimateRecord, axes: &WindAxes) -> WindComponents {
    let (speed, direction) = match (record.wind_speed, record.wind_direction) {
        (Some(speed), _) if speed == 0.0 => return [Some(0.0), Some(0.0)],
        (Some(speed), Some(direction)) => (speed, direction),
        _ => return [None, None],
    };
    let speed = speed * KMH_TO_MS;
    let (sin, cos) = (direction * 10.0).to_radians().sin_cos();
    let (u, v) = axes.apply(-speed * sin, -speed * cos);
    [Some(u), Some(v)]
}
