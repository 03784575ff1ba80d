//! Dense seismic volumes and index-level helpers

use crate::error::{Result, SeismicError};
use crate::types::{IndexRange, LineType};
use crate::utils::format_size;
use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

/// Amplitude cube indexed `[xline, inline, depth]`
pub type SeismicVolume = Array3<f32>;

/// Index ranges of a volume, one per axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRangeInfo {
    pub xline_range: IndexRange,
    pub inline_range: IndexRange,
    pub depth_sample_range: IndexRange,
    pub shape: [usize; 3],
}

/// Report the index range of each axis of a `[xline, inline, depth]` volume
pub fn volume_range_info(volume: &SeismicVolume) -> VolumeRangeInfo {
    let (n_xlines, n_inlines, n_depth) = volume.dim();
    VolumeRangeInfo {
        xline_range: IndexRange::for_len(n_xlines),
        inline_range: IndexRange::for_len(n_inlines),
        depth_sample_range: IndexRange::for_len(n_depth),
        shape: [n_xlines, n_inlines, n_depth],
    }
}

/// One-line description of a volume's shape and memory footprint
pub fn summary(volume: &SeismicVolume) -> String {
    let (x, i, d) = volume.dim();
    format!(
        "{} xlines x {} inlines x {} samples, {}",
        x,
        i,
        d,
        format_size(volume.len() * std::mem::size_of::<f32>())
    )
}

/// Parse an axis order string such as `"xid"` into axis positions
///
/// Letters: `i` inline, `x` crossline, `d` depth. Each must appear exactly once.
pub fn parse_axis_order(order: &str) -> Result<[char; 3]> {
    let chars: Vec<char> = order.chars().collect();
    let valid = chars.len() == 3
        && chars.iter().all(|c| matches!(c, 'i' | 'x' | 'd'))
        && chars[0] != chars[1]
        && chars[0] != chars[2]
        && chars[1] != chars[2];
    if !valid {
        return Err(SeismicError::InvalidAxisOrder(order.to_string()));
    }
    Ok([chars[0], chars[1], chars[2]])
}

/// Permute the axes of a volume from `current_order` to `target_order`
pub fn reorder_volume(
    volume: Array3<f32>,
    current_order: &str,
    target_order: &str,
) -> Result<Array3<f32>> {
    let current = parse_axis_order(current_order)?;
    let target = parse_axis_order(target_order)?;

    if current == target {
        return Ok(volume);
    }

    let mut axes = [0usize; 3];
    for (slot, letter) in axes.iter_mut().zip(target.iter()) {
        // Both orders are permutations of the same three letters
        *slot = current.iter().position(|c| c == letter).unwrap_or_default();
    }

    Ok(volume.permuted_axes(axes).as_standard_layout().into_owned())
}

/// Cut a 2D section out of a `[xline, inline, depth]` volume
///
/// Vertical sections come back with depth along the rows.
pub fn extract_slice(volume: &SeismicVolume, line: LineType, index: usize) -> Result<Array2<f32>> {
    let axis = match line {
        LineType::Xline => Axis(0),
        LineType::Inline => Axis(1),
        LineType::Depth => Axis(2),
    };

    let len = volume.len_of(axis);
    if index >= len {
        return Err(SeismicError::IndexOutOfRange { index, len });
    }

    let section = volume.index_axis(axis, index);
    Ok(match line {
        LineType::Xline | LineType::Inline => section.t().to_owned(),
        LineType::Depth => section.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: (usize, usize, usize)) -> SeismicVolume {
        Array3::from_shape_fn(shape, |(x, i, d)| (x * 100 + i * 10 + d) as f32)
    }

    #[test]
    fn test_range_info() {
        let info = volume_range_info(&ramp((4, 3, 7)));
        assert_eq!(info.xline_range, IndexRange { first: 0, last: 3 });
        assert_eq!(info.inline_range, IndexRange { first: 0, last: 2 });
        assert_eq!(info.depth_sample_range, IndexRange { first: 0, last: 6 });
        assert_eq!(info.shape, [4, 3, 7]);
    }

    #[test]
    fn test_reorder_identity() {
        let v = ramp((2, 3, 4));
        assert_eq!(reorder_volume(v.clone(), "xid", "xid").unwrap(), v);
    }

    #[test]
    fn test_reorder_round_trip() {
        let v = ramp((2, 3, 4));
        let moved = reorder_volume(v.clone(), "xid", "ixd").unwrap();
        assert_eq!(moved.dim(), (3, 2, 4));
        assert_eq!(moved[[2, 1, 3]], v[[1, 2, 3]]);
        let back = reorder_volume(moved, "ixd", "xid").unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_reorder_depth_first() {
        let v = ramp((2, 3, 4));
        let moved = reorder_volume(v.clone(), "xid", "dxi").unwrap();
        assert_eq!(moved.dim(), (4, 2, 3));
        assert_eq!(moved[[3, 1, 2]], v[[1, 2, 3]]);
    }

    #[test]
    fn test_reorder_rejects_bad_order() {
        let v = ramp((1, 1, 1));
        assert!(matches!(
            reorder_volume(v.clone(), "xiz", "xid"),
            Err(SeismicError::InvalidAxisOrder(_))
        ));
        assert!(reorder_volume(v.clone(), "xid", "xxd").is_err());
        assert!(reorder_volume(v, "xi", "xid").is_err());
    }

    #[test]
    fn test_extract_slices() {
        let v = ramp((2, 3, 4));

        let inline = extract_slice(&v, LineType::Inline, 1).unwrap();
        assert_eq!(inline.dim(), (4, 2));
        assert_eq!(inline[[3, 1]], v[[1, 1, 3]]);

        let xline = extract_slice(&v, LineType::Xline, 0).unwrap();
        assert_eq!(xline.dim(), (4, 3));
        assert_eq!(xline[[2, 2]], v[[0, 2, 2]]);

        let depth = extract_slice(&v, LineType::Depth, 3).unwrap();
        assert_eq!(depth.dim(), (2, 3));
        assert_eq!(depth[[1, 2]], v[[1, 2, 3]]);

        assert!(matches!(
            extract_slice(&v, LineType::Depth, 4),
            Err(SeismicError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_summary() {
        let s = summary(&Array3::zeros((16, 16, 16)));
        assert!(s.starts_with("16 xlines x 16 inlines x 16 samples"));
        assert!(s.ends_with("16.0 KiB"));
    }
}
