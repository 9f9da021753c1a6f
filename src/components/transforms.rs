use geo::{AffineTransform, Coord};
use serde::Serialize;
use shrinkwraprs::Shrinkwrap;

use crate::components::bounds::GeoBounds;

/// Pixel to world affine transform of a raster.
///
/// Built from the gdal ordering
/// `(origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height)`.
#[derive(Shrinkwrap, Debug, Clone, Copy, PartialEq)]
pub struct PixelTransform(AffineTransform);

impl PixelTransform {
    /// Transform used by gdal when a file carries no georeferencing.
    pub const IDENTITY: [f64; 6] = [0., 1., 0., 0., 0., 1.];

    pub fn from_gdal(gdal_transform: [f64; 6]) -> Self {
        Self(AffineTransform::new(
            gdal_transform[1],
            gdal_transform[2],
            gdal_transform[0],
            gdal_transform[4],
            gdal_transform[5],
            gdal_transform[3],
        ))
    }

    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.0.xoff(),
            self.0.a(),
            self.0.b(),
            self.0.yoff(),
            self.0.d(),
            self.0.e(),
        ]
    }

    /// Signed width of a pixel in crs units.
    pub fn pixel_width(&self) -> f64 {
        self.0.a()
    }

    /// Signed height of a pixel in crs units, negative for north-up rasters.
    pub fn pixel_height(&self) -> f64 {
        self.0.e()
    }

    /// `(|pixel_width|, |pixel_height|)`
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.pixel_width().abs(), self.pixel_height().abs())
    }

    pub fn pixel_area(&self) -> f64 {
        (self.pixel_width() * self.pixel_height()).abs()
    }

    /// Bounds of a `(width, height)` pixel grid, taken over all four corners
    /// so rotated and south-up grids still give `left <= right`, `bottom <= top`.
    pub fn bounds(&self, size: (usize, usize)) -> GeoBounds {
        let (width, height) = (size.0 as f64, size.1 as f64);
        let corners = [(0., 0.), (width, 0.), (0., height), (width, height)]
            .map(|corner| self.0.apply(Coord::from(corner)));
        let (mut min, mut max) = (corners[0], corners[0]);
        for corner in &corners[1..] {
            min.x = min.x.min(corner.x);
            min.y = min.y.min(corner.y);
            max.x = max.x.max(corner.x);
            max.y = max.y.max(corner.y);
        }
        GeoBounds::new(min.x, min.y, max.x, max.y)
    }
}

impl Serialize for PixelTransform {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_gdal().serialize(serializer)
    }
}
