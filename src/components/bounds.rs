use geo::{Coord, Rect};
use serde::{ser::SerializeStruct, Serialize};
use shrinkwraprs::Shrinkwrap;

use crate::intersection::Overlap;

/// Axis aligned bounds of a raster in the units of its crs.
///
/// `left`/`bottom` are the `min` corner of the underlying [Rect],
/// `right`/`top` the `max` corner.
#[derive(Shrinkwrap, Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds(Rect<f64>);

impl GeoBounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self(Rect::new(
            Coord { x: left, y: bottom },
            Coord { x: right, y: top },
        ))
    }

    pub fn left(&self) -> f64 {
        self.0.min().x
    }

    pub fn bottom(&self) -> f64 {
        self.0.min().y
    }

    pub fn right(&self) -> f64 {
        self.0.max().x
    }

    pub fn top(&self) -> f64 {
        self.0.max().y
    }

    /// `(right - left) * (top - bottom)`
    pub fn area(&self) -> f64 {
        self.0.width() * self.0.height()
    }

    pub fn overlaps(&self, rhs: &Self) -> bool {
        self.0.overlaps(&rhs.0)
    }

    pub fn union(&self, rhs: &Self) -> Self {
        Self(self.0.union(&rhs.0))
    }
}

impl From<Rect<f64>> for GeoBounds {
    fn from(value: Rect<f64>) -> Self {
        Self(value)
    }
}

impl Serialize for GeoBounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GeoBounds", 4)?;
        state.serialize_field("left", &self.left())?;
        state.serialize_field("bottom", &self.bottom())?;
        state.serialize_field("right", &self.right())?;
        state.serialize_field("top", &self.top())?;
        state.end()
    }
}
