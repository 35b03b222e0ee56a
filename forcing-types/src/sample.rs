use crate::timestamp::Timestamp;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// A scalar reading; `None` is a missing value, distinct from every number.
pub type Scalar = Option<f64>;

/// Two wind velocity components, each of which may be missing.
pub type WindComponents = [Option<f64>; 2];

/// Series of one family keyed by quantity name.
pub type SeriesMap<V> = BTreeMap<String, Series<V>>;

/// A value held by a sample: a scalar or a fixed-arity tuple of scalars.
pub trait Reading: Clone + Debug + PartialEq {
    /// The missing sentinel for this kind of value.
    fn missing() -> Self;

    /// True when the value (or any of its components) is missing.
    fn is_missing(&self) -> bool;

    /// The `step`-th (zero based) of `steps - 1` evenly spaced values strictly
    /// between `last` and `next`: `last + (next - last) / steps * (step + 1)`.
    fn interpolate(last: &Self, next: &Self, step: usize, steps: usize) -> Self;
}

fn lerp(last: Option<f64>, next: Option<f64>, step: usize, steps: usize) -> Option<f64> {
    let (last, next) = (last?, next?);
    let delta = (next - last) / steps as f64;
    Some(last + delta * (step + 1) as f64)
}

impl Reading for Option<f64> {
    fn missing() -> Self {
        None
    }

    fn is_missing(&self) -> bool {
        self.is_none()
    }

    fn interpolate(last: &Self, next: &Self, step: usize, steps: usize) -> Self {
        lerp(*last, *next, step, steps)
    }
}

impl<const N: usize> Reading for [Option<f64>; N] {
    fn missing() -> Self {
        [None; N]
    }

    fn is_missing(&self) -> bool {
        self.iter().any(Option::is_none)
    }

    /// Componentwise, each component with its own delta.
    fn interpolate(last: &Self, next: &Self, step: usize, steps: usize) -> Self {
        std::array::from_fn(|i| lerp(last[i], next[i], step, steps))
    }
}

/// One `(timestamp, value)` entry of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<V> {
    pub timestamp: Timestamp,
    pub value: V,
}

impl<V: Reading> Sample<V> {
    pub fn new(timestamp: impl Into<Timestamp>, value: V) -> Self {
        Sample {
            timestamp: timestamp.into(),
            value,
        }
    }

    pub fn missing(timestamp: impl Into<Timestamp>) -> Self {
        Sample::new(timestamp, V::missing())
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_missing()
    }
}

/// Ordered samples for one named quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<V> {
    pub quantity: String,
    pub samples: Vec<Sample<V>>,
}

impl<V: Reading> Series<V> {
    pub fn new(quantity: impl Into<String>) -> Self {
        Series {
            quantity: quantity.into(),
            samples: Vec::new(),
        }
    }

    pub fn from_samples(quantity: impl Into<String>, samples: Vec<Sample<V>>) -> Self {
        Series {
            quantity: quantity.into(),
            samples,
        }
    }

    pub fn push(&mut self, sample: Sample<V>) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample<V>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample<V>> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample<V>> {
        self.samples.iter()
    }

    /// Number of samples currently holding the missing sentinel.
    pub fn missing_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_missing()).count()
    }
}

impl<'a, V> IntoIterator for &'a Series<V> {
    type Item = &'a Sample<V>;
    type IntoIter = std::slice::Iter<'a, Sample<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 10, d).unwrap()
    }

    #[test]
    fn test_missing_is_not_zero() {
        let zero: Scalar = Some(0.0);
        assert!(!zero.is_missing());
        assert!(Scalar::missing().is_missing());
    }

    #[test]
    fn test_vector_missing_when_any_component_missing() {
        let partial: WindComponents = [Some(1.0), None];
        assert!(partial.is_missing());
        let calm: WindComponents = [Some(1.0), Some(0.0)];
        assert!(!calm.is_missing());
        assert_eq!(WindComponents::missing(), [None, None]);
    }

    #[test]
    fn test_scalar_interpolate() {
        assert_eq!(Scalar::interpolate(&Some(215.0), &Some(235.0), 0, 2), Some(225.0));
        assert_eq!(Scalar::interpolate(&Some(215.0), &Some(230.0), 0, 3), Some(220.0));
        assert_eq!(Scalar::interpolate(&Some(215.0), &Some(230.0), 1, 3), Some(225.0));
        assert_eq!(Scalar::interpolate(&None, &Some(230.0), 0, 2), None);
    }

    #[test]
    fn test_vector_interpolate_is_componentwise() {
        let last: WindComponents = [Some(1.0), Some(-2.0)];
        let next: WindComponents = [Some(2.0), Some(-1.0)];
        assert_eq!(
            WindComponents::interpolate(&last, &next, 0, 2),
            [Some(1.5), Some(-1.5)]
        );
    }

    #[test]
    fn test_series_bookkeeping() {
        let mut series: Series<Scalar> = Series::new("major river");
        assert!(series.is_empty());
        series.push(Sample::new(day(23), Some(4300.0)));
        series.push(Sample::missing(day(24)));
        series.push(Sample::new(day(25), Some(4500.0)));
        assert_eq!(series.len(), 3);
        assert_eq!(series.missing_count(), 1);
        assert_eq!(series.first().unwrap().value, Some(4300.0));
        assert_eq!(series.last().unwrap().timestamp.to_string(), "2011-10-25");
        assert_eq!((&series).into_iter().count(), 3);
    }
}
