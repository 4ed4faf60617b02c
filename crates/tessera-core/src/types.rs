//! Color, geometry and layout-attribute types

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color with channels in the 0–1 range
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Hex notation (`#RRGGBB`), channels clamped to 0–1
    pub fn to_hex(&self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Axis-aligned bounding box, position relative to the parent node
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rect containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Auto-layout direction of a container
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl LayoutMode {
    pub fn is_auto_layout(&self) -> bool {
        !matches!(self, LayoutMode::None)
    }
}

/// Sizing behavior along one auto-layout axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    #[default]
    Fixed,
    Auto,
}

/// How a node responds when its parent is resized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    #[default]
    Min,
    Center,
    Max,
    Stretch,
    Scale,
}

/// Whether a child participates in its parent's auto-layout flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    #[default]
    Auto,
    Absolute,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Resize constraints on both axes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub horizontal: ConstraintType,
    pub vertical: ConstraintType,
}

impl Constraints {
    pub const fn new(horizontal: ConstraintType, vertical: ConstraintType) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Axes whose constraint equals `kind`, horizontal first
    pub fn axes_with(&self, kind: ConstraintType) -> Vec<Axis> {
        let mut axes = Vec::new();
        if self.horizontal == kind {
            axes.push(Axis::Horizontal);
        }
        if self.vertical == kind {
            axes.push(Axis::Vertical);
        }
        axes
    }

    /// Replace `from` with `to` on every axis that has it; the other axis is untouched
    pub fn replace(&mut self, from: ConstraintType, to: ConstraintType) -> bool {
        let mut changed = false;
        if self.horizontal == from {
            self.horizontal = to;
            changed = true;
        }
        if self.vertical == from {
            self.vertical = to;
            changed = true;
        }
        changed
    }
}

/// Inner padding of an auto-layout container
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn values(&self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// Sides differ and at least one of them is positive
    pub fn is_asymmetric(&self) -> bool {
        let v = self.values();
        let all_equal = v.iter().all(|p| *p == v[0]);
        !all_equal && v.iter().any(|p| *p > 0.0)
    }

    /// Mean of the positive sides, rounded to the nearest integer
    pub fn positive_average(&self) -> f64 {
        let positive: Vec<f64> = self.values().into_iter().filter(|p| *p > 0.0).collect();
        if positive.is_empty() {
            return 0.0;
        }
        (positive.iter().sum::<f64>() / positive.len() as f64).round()
    }
}
