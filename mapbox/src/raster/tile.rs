//! Tile pixel-space drawing
//!
//! A [`Tile`] couples an image with its position on the world tile grid,
//! so overlays (markers) can be placed in local pixel space, in global
//! pixel space at the tile's zoom, or directly by geographic location.

use image::{imageops, RgbaImage};

use super::types::RasterError;
use crate::coord::{self, Location, TileCoord};

/// Vertical anchoring of an overlay relative to its target point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Top edge on the point
    Top,
    #[default]
    Center,
    /// Bottom edge on the point (pin-style markers)
    Bottom,
}

/// Horizontal anchoring of an overlay relative to its target point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Left edge on the point
    Left,
    #[default]
    Center,
    /// Right edge on the point
    Right,
}

/// How to justify an overlay against the point it is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub vertical: VAlign,
    pub horizontal: HAlign,
}

/// Overlay centered on the point.
pub const CENTER: Anchor = Anchor {
    vertical: VAlign::Center,
    horizontal: HAlign::Center,
};

impl Anchor {
    /// Bottom-center anchor, the usual choice for map pins.
    pub const fn pin() -> Self {
        Anchor {
            vertical: VAlign::Bottom,
            horizontal: HAlign::Center,
        }
    }

    /// Top-left offset of an overlay of the given size when anchored at
    /// a point.
    fn offset(self, width: u32, height: u32) -> (i64, i64) {
        let dx = match self.horizontal {
            HAlign::Left => 0,
            HAlign::Center => -(width as i64 / 2),
            HAlign::Right => -(width as i64),
        };
        let dy = match self.vertical {
            VAlign::Top => 0,
            VAlign::Center => -(height as i64 / 2),
            VAlign::Bottom => -(height as i64),
        };
        (dx, dy)
    }
}

/// A raster tile (or a stitched composite of tiles) pinned to the world
/// tile grid.
///
/// `size` is the per-tile pixel size the geo transforms assume (256, or
/// 512 for @2x tiles); the image itself may span several tiles when it
/// came out of [`super::TileGrid::stitch`].
pub struct Tile {
    coord: TileCoord,
    size: u32,
    image: RgbaImage,
}

impl Tile {
    /// Pins `image` to the grid at `coord`, with `size` pixels per tile.
    pub fn new(coord: TileCoord, size: u32, image: RgbaImage) -> Self {
        Self { coord, size, image }
    }

    /// The tile's grid coordinate (top-left tile for composites).
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Per-tile pixel size used by the geo transforms.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixel origin of this tile on the world bitmap at its zoom.
    fn pixel_origin(&self) -> (i64, i64) {
        (
            self.coord.x as i64 * self.size as i64,
            self.coord.y as i64 * self.size as i64,
        )
    }

    /// Draws `overlay` at a point in the tile's own pixel space.
    ///
    /// Placements overhanging the edge are clipped; alpha is respected.
    pub fn draw_local(&mut self, overlay: &RgbaImage, x: i64, y: i64, anchor: Anchor) {
        let (dx, dy) = anchor.offset(overlay.width(), overlay.height());
        imageops::overlay(&mut self.image, overlay, x + dx, y + dy);
    }

    /// Draws `overlay` at a point in global pixel space at this tile's
    /// zoom level.
    ///
    /// Errors when the placement lies wholly outside the image.
    pub fn draw_global(
        &mut self,
        overlay: &RgbaImage,
        x: i64,
        y: i64,
        anchor: Anchor,
    ) -> Result<(), RasterError> {
        let (origin_x, origin_y) = self.pixel_origin();
        let (local_x, local_y) = (x - origin_x, y - origin_y);

        let (dx, dy) = anchor.offset(overlay.width(), overlay.height());
        let (left, top) = (local_x + dx, local_y + dy);
        let (width, height) = (self.image.width(), self.image.height());

        let outside = left >= width as i64
            || top >= height as i64
            || left + overlay.width() as i64 <= 0
            || top + overlay.height() as i64 <= 0;
        if outside {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                tile: self.coord,
                width,
                height,
            });
        }

        self.draw_local(overlay, local_x, local_y, anchor);
        Ok(())
    }

    /// Draws `overlay` at a geographic location.
    pub fn draw_location(
        &mut self,
        overlay: &RgbaImage,
        location: Location,
        anchor: Anchor,
    ) -> Result<(), RasterError> {
        let (px, py) = coord::to_global_pixel(location, self.coord.zoom, self.size)?;
        self.draw_global(overlay, px.round() as i64, py.round() as i64, anchor)
    }
}
