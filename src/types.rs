use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Variable values used when evaluating a program
pub type Bindings = HashMap<String, f64>;

/// Closed interval attached to a variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn interval(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Smallest range covering both
    pub fn union(&self, other: &Range) -> Range {
        Range {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `count` evenly spaced values from `min` to `max` inclusive
    pub fn spread(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.min],
            _ => {
                let step = self.interval() / (count - 1) as f64;
                (0..count).map(|i| self.min + step * i as f64).collect()
            }
        }
    }

    /// Sign of every value in the range: `Some(0)` for the degenerate zero
    /// range, `Some(1)`/`Some(-1)` when strictly positive/negative.
    pub fn sign(&self) -> Option<i8> {
        if self.min > 0.0 {
            Some(1)
        } else if self.max < 0.0 {
            Some(-1)
        } else if self.min == 0.0 && self.max == 0.0 {
            Some(0)
        } else {
            None
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}
