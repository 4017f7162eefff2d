#![warn(missing_docs, trivial_casts, trivial_numeric_casts, unused_qualifications)]

//! Connected-component labeling for `ArrayBase`, the *n*-dimensional array data structure
//! provided by [`ndarray`].
//!
//! [`label`] assigns every maximal connected region of a binary image a dense positive integer
//! label. It supports arbitrary rank, configurable connectivity, optional region-size filtering
//! and periodic boundary conditions.

mod boundary;
mod error;
mod geometry;
mod regions;
mod scan;
mod scan2d;

pub use boundary::BoundaryCondition;
pub use error::{LabelError, Result};
pub use regions::LabelType;

use ndarray::{Array, ArrayBase, Data, Dimension};

/// Labels the connected components of a binary image.
///
/// `connectivity` must be between 1 (only axis-aligned neighbors) and `input.ndim()` (every
/// neighbor in the `3^n - 1` box, including all diagonals) inclusive. `min_size`/`max_size` are
/// pixel-count bounds on kept regions; `0` leaves that side unbounded, and `(0, 0)` keeps every
/// region regardless of size. `boundary_condition` gives a per-axis policy (see
/// [`BoundaryCondition`]); axes beyond the end of the slice default to
/// [`BoundaryCondition::AddZeros`].
///
/// Returns the labeled array (same shape as `input`, element type [`LabelType`]) and the number
/// of distinct nonzero labels it contains.
///
/// # Errors
///
/// - [`LabelError::ImageNotForged`] if any axis of `input` has length 0.
/// - [`LabelError::ParameterOutOfRange`] if `connectivity` is 0 or exceeds `input.ndim()`.
/// - [`LabelError::BoundaryConditionLength`] if `boundary_condition` has more entries than
///   `input.ndim()`.
/// - [`LabelError::LabelOverflow`] if labeling the image would require more provisional labels
///   than [`LabelType`] can represent.
pub fn label<S, D>(
    input: &ArrayBase<S, D>,
    connectivity: usize,
    min_size: usize,
    max_size: usize,
    boundary_condition: &[BoundaryCondition],
) -> Result<(Array<LabelType, D>, usize)>
where
    S: Data<Elem = bool>,
    D: Dimension,
{
    let rank = input.ndim();
    let sizes: Vec<usize> = input.shape().to_vec();
    if sizes.iter().any(|&s| s == 0) {
        return Err(LabelError::ImageNotForged { shape: sizes });
    }
    if connectivity == 0 || connectivity > rank {
        return Err(LabelError::ParameterOutOfRange { connectivity, rank });
    }
    let boundary_condition = boundary::normalize(boundary_condition, rank)?;

    let foreground: Vec<bool> = input.iter().copied().collect();

    let (mut labels, mut regions) = if rank == 2 && connectivity == 2 {
        scan2d::fast(sizes[0], sizes[1], &foreground)?
    } else {
        scan::general(&sizes, &foreground, connectivity)?
    };

    let strides = scan::c_strides(&sizes);
    boundary::apply(&sizes, &strides, &mut labels, &boundary_condition, &mut regions);

    let predicate = size_predicate(min_size, max_size);
    let n_label = regions.relabel(predicate);
    for l in labels.iter_mut() {
        if *l != 0 {
            *l = regions.translate(*l);
        }
    }

    let output = Array::from_shape_vec(input.raw_dim(), labels)
        .expect("flattened buffer has exactly input's element count");
    Ok((output, n_label))
}

fn size_predicate(min_size: usize, max_size: usize) -> impl Fn(usize) -> bool {
    move |size| {
        let above_min = min_size == 0 || size >= min_size;
        let below_max = max_size == 0 || size <= max_size;
        above_min && below_max
    }
}
