//! `.npy` array dumps
//!
//! Pre-converted volumes carry their shape in the file header, so loading
//! them needs no geometry inference.

use crate::error::{Result, SeismicError};
use crate::volume::SeismicVolume;
use ndarray::{Array3, ShapeBuilder};
use npyz::{DType, NpyFile, Order};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn npy_err(err: std::io::Error) -> SeismicError {
    SeismicError::Npy(err.to_string())
}

/// Load a 3D `f4` or `f8` array as a `[xline, inline, depth]` volume
///
/// Double precision data is narrowed to f32.
pub fn load_npy(path: impl AsRef<Path>) -> Result<SeismicVolume> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let npy = NpyFile::new(reader).map_err(npy_err)?;

    let shape: Vec<usize> = npy.shape().iter().map(|&n| n as usize).collect();
    let &[x, i, d] = shape.as_slice() else {
        return Err(SeismicError::InvalidDimensions(format!(
            "expected a 3D array (xlines, inlines, depth), found shape {:?}",
            shape
        )));
    };
    let fortran = matches!(npy.order(), Order::Fortran);

    let type_str = match npy.dtype() {
        DType::Plain(ts) => ts.to_string(),
        _ => {
            return Err(SeismicError::Npy(
                "structured and sub-array dtypes are not supported".to_string(),
            ))
        }
    };

    let data: Vec<f32> = if type_str.ends_with("f4") {
        npy.into_vec::<f32>().map_err(npy_err)?
    } else if type_str.ends_with("f8") {
        npy.into_vec::<f64>()
            .map_err(npy_err)?
            .into_iter()
            .map(|v| v as f32)
            .collect()
    } else {
        return Err(SeismicError::Npy(format!(
            "unsupported dtype {}, expected f4 or f8",
            type_str
        )));
    };

    let volume = if fortran {
        Array3::from_shape_vec((x, i, d).f(), data)?
    } else {
        Array3::from_shape_vec((x, i, d), data)?
    };
    log::debug!("Loaded .npy volume {:?} ({})", volume.dim(), type_str);
    Ok(volume)
}
