//! Gradient blending of neighbouring images along one axis.

use image::{imageops, GenericImageView, Rgb, RgbImage};
use tracing::trace;

use crate::error::{Result, TilestitchError};

/// The axis two images are joined along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Left-to-right, blending across a vertical seam.
    Horizontal,
    /// Top-to-bottom, blending across a horizontal seam.
    Vertical,
}

impl Axis {
    /// Extent of `image` along the stitch axis.
    #[inline]
    fn along(self, image: &RgbImage) -> u32 {
        match self {
            Axis::Horizontal => image.width(),
            Axis::Vertical => image.height(),
        }
    }

    /// Extent of `image` perpendicular to the stitch axis.
    #[inline]
    fn across(self, image: &RgbImage) -> u32 {
        match self {
            Axis::Horizontal => image.height(),
            Axis::Vertical => image.width(),
        }
    }

    /// Maps `(along, across)` to `(x, y)`.
    #[inline]
    fn xy(self, along: u32, across: u32) -> (u32, u32) {
        match self {
            Axis::Horizontal => (along, across),
            Axis::Vertical => (across, along),
        }
    }

    fn dims(self, along: u32, across: u32) -> (u32, u32) {
        self.xy(along, across)
    }
}

/// Builds a linear ramp of `len` weights for the first image.
///
/// `mask[0]` is 255 (all first image) and the ramp falls towards 0, with
/// `mask[i] = trunc(255 * (1 - i / len))`. The second image gets the
/// complement.
pub fn gradient_mask(len: u32) -> Vec<u8> {
    (0..len)
        .map(|i| (255.0 * (1.0 - f64::from(i) / f64::from(len))) as u8)
        .collect()
}

/// Composites two pixels, giving `weight / 255` to `a` and the rest to `b`.
///
/// Rounds to nearest, so identical inputs come back unchanged.
#[inline]
pub fn blend_pixel(a: Rgb<u8>, b: Rgb<u8>, weight: u8) -> Rgb<u8> {
    let wa = u32::from(weight);
    let wb = 255 - wa;
    Rgb(std::array::from_fn(|c| {
        ((u32::from(a.0[c]) * wa + u32::from(b.0[c]) * wb + 127) / 255) as u8
    }))
}

/// Joins `parts` along `axis` into a single preallocated image.
///
/// `overlaps[i]` is the geometric overlap between `parts[i]` and
/// `parts[i + 1]`. A positive overlap is blended over a strip of width
/// `min(padding, overlap)` centred inside the overlap; a zero or negative
/// overlap places the parts edge to edge.
///
/// # Errors
/// Returns [`TilestitchError::StripSizeMismatch`] if the parts disagree on
/// their perpendicular extent, or an overlap is larger than either side.
pub(crate) fn stitch_strip(
    parts: &[RgbImage],
    overlaps: &[i64],
    axis: Axis,
    padding: u32,
) -> Result<RgbImage> {
    let Some(first) = parts.first() else {
        return Ok(RgbImage::new(0, 0));
    };
    debug_assert_eq!(overlaps.len() + 1, parts.len());

    let across = axis.across(first);

    // Size the canvas up front so every part is written in place.
    let mut length = u64::from(axis.along(first));
    for (part, &overlap) in parts[1..].iter().zip(overlaps) {
        let overlap = overlap.max(0) as u64;
        let part_len = u64::from(axis.along(part));
        if axis.across(part) != across || overlap > length || overlap > part_len {
            return Err(TilestitchError::StripSizeMismatch {
                first: axis.dims(length.min(u64::from(u32::MAX)) as u32, across),
                second: part.dimensions(),
            });
        }
        length = length - overlap + part_len;
    }
    let length = u32::try_from(length).map_err(|_| {
        TilestitchError::invalid_config("canvas", "stitched length exceeds u32 pixels")
    })?;

    let (width, height) = axis.dims(length, across);
    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, first, 0, 0);

    let mut cursor = axis.along(first);
    for (part, &overlap) in parts[1..].iter().zip(overlaps) {
        let part_len = axis.along(part);

        if overlap <= 0 {
            let (x, y) = axis.xy(cursor, 0);
            imageops::replace(&mut canvas, part, i64::from(x), i64::from(y));
            cursor += part_len;
            continue;
        }

        let overlap = overlap as u32;
        let blend = padding.min(overlap);
        let offset = (overlap - blend) / 2;
        let start = cursor - overlap + offset;
        trace!(?axis, overlap, blend, offset, start, "blending seam");

        let mask = gradient_mask(blend);
        for (k, &weight) in (0..blend).zip(&mask) {
            for j in 0..across {
                let (cx, cy) = axis.xy(start + k, j);
                let (px, py) = axis.xy(offset + k, j);
                let mixed =
                    blend_pixel(*canvas.get_pixel(cx, cy), *part.get_pixel(px, py), weight);
                canvas.put_pixel(cx, cy, mixed);
            }
        }

        let tail_start = offset + blend;
        let tail_len = part_len - tail_start;
        if tail_len > 0 {
            let (sx, sy) = axis.xy(tail_start, 0);
            let (tw, th) = axis.dims(tail_len, across);
            let (dx, dy) = axis.xy(start + blend, 0);
            imageops::replace(
                &mut canvas,
                &*part.view(sx, sy, tw, th),
                i64::from(dx),
                i64::from(dy),
            );
        }
        cursor = start + blend + tail_len;
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    #[test]
    fn test_gradient_mask_endpoints() {
        let mask = gradient_mask(4);
        assert_eq!(mask, vec![255, 191, 127, 63]);
        assert_eq!(gradient_mask(1), vec![255]);
        assert!(gradient_mask(0).is_empty());
    }

    #[test]
    fn test_blend_pixel_weights() {
        let a = Rgb([200, 100, 0]);
        let b = Rgb([0, 100, 255]);
        assert_eq!(blend_pixel(a, b, 255), a);
        assert_eq!(blend_pixel(a, b, 0), b);
        assert_eq!(blend_pixel(a, a, 77), a);
    }

    #[test]
    fn test_horizontal_blend_boundaries() {
        let a = solid(20, 4, 200);
        let b = solid(20, 4, 0);
        let out = stitch_strip(&[a, b], &[10], Axis::Horizontal, 6).expect("stitch");

        assert_eq!(out.dimensions(), (30, 4));
        // overlap 10, blend 6, offset 2: strip occupies x in [12, 18).
        assert_eq!(out.get_pixel(11, 0), &Rgb([200, 200, 200]));
        assert_eq!(out.get_pixel(12, 0), &Rgb([200, 200, 200]));
        let last = out.get_pixel(17, 0).0[0];
        assert!(last <= 200 / 6 + 1, "last blend pixel {} should be near 0", last);
        assert_eq!(out.get_pixel(18, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_vertical_blend_dimensions() {
        let a = solid(5, 12, 10);
        let b = solid(5, 9, 10);
        let out = stitch_strip(&[a, b], &[3], Axis::Vertical, 64).expect("stitch");
        assert_eq!(out.dimensions(), (5, 18));
        assert!(out.pixels().all(|p| *p == Rgb([10, 10, 10])));
    }

    #[test]
    fn test_odd_overlap_remainder_keeps_size() {
        let a = solid(16, 2, 50);
        let b = solid(16, 2, 50);
        // overlap 7, blend 4, offset 1.
        let out = stitch_strip(&[a, b], &[7], Axis::Horizontal, 4).expect("stitch");
        assert_eq!(out.width(), 25);
        assert!(out.pixels().all(|p| *p == Rgb([50, 50, 50])));
    }

    #[test]
    fn test_non_positive_overlap_concatenates() {
        let a = solid(3, 2, 1);
        let b = solid(4, 2, 2);
        let out = stitch_strip(&[a, b], &[-5], Axis::Horizontal, 8).expect("stitch");
        assert_eq!(out.dimensions(), (7, 2));
        assert_eq!(out.get_pixel(2, 1), &Rgb([1, 1, 1]));
        assert_eq!(out.get_pixel(3, 1), &Rgb([2, 2, 2]));
    }

    #[test]
    fn test_mismatched_heights_rejected() {
        let a = solid(10, 4, 0);
        let b = solid(10, 5, 0);
        let err = stitch_strip(&[a, b], &[2], Axis::Horizontal, 2).unwrap_err();
        assert!(matches!(err, TilestitchError::StripSizeMismatch { .. }));
    }

    #[test]
    fn test_overlap_larger_than_part_rejected() {
        let a = solid(10, 4, 0);
        let b = solid(3, 4, 0);
        let err = stitch_strip(&[a, b], &[5], Axis::Horizontal, 2).unwrap_err();
        assert!(err.is_validation());
    }
}
