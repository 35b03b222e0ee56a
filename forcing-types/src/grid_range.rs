use crate::timestamp::Timestamp;
use chrono::TimeDelta;
use std::mem::replace;

/// An iterator over regular grid points from the start up to, but not
/// including, the end.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct GridRange {
    next: Timestamp,
    end: Timestamp,
    step: TimeDelta,
}

impl GridRange {
    pub fn new(start: Timestamp, end: Timestamp, step: TimeDelta) -> Self {
        GridRange {
            next: start,
            end,
            step,
        }
    }
}

impl Iterator for GridRange {
    type Item = Timestamp;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.end && self.step > TimeDelta::zero() {
            let next = self.next + self.step;
            Some(replace(&mut self.next, next))
        } else {
            None
        }
    }
}
