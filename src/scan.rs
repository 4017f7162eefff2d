//! The general N-dimensional first pass (specification §4.3) and the brute-force fallback for
//! images whose optimal processing axis is shorter than 3 pixels.
//!
//! Both operate on a flat, row-major (`C`-order) buffer rather than directly on an `ndarray`
//! array: the crate's entry point flattens its input once via `iter()` (which already walks any
//! `ArrayBase` in row-major logical order, regardless of its actual memory layout) and rebuilds
//! an `ndarray` array from the flat result afterwards. This keeps the scan logic — which needs
//! raw offset arithmetic across axis boundaries, the same technique `ndarray-ndimage`'s own
//! `morphology::Offsets` uses internally — entirely independent of `ndarray`'s dimension types.

use crate::error::Result;
use crate::geometry;
use crate::regions::{LabelType, RegionTable};

/// Runs the general N-D first pass over a row-major `foreground` buffer of the given `sizes`,
/// falling back to [`tiny`] when the optimal processing axis is too short to scan line-by-line.
pub(crate) fn general(
    sizes: &[usize],
    foreground: &[bool],
    connectivity: usize,
) -> Result<(Vec<LabelType>, RegionTable)> {
    let rank = sizes.len();
    let axis = optimal_axis(sizes);
    let len = sizes[axis];
    if len < 3 {
        return tiny(sizes, foreground, connectivity);
    }

    let strides = c_strides(sizes);
    let mut labels: Vec<LabelType> = foreground.iter().map(|&v| v as LabelType).collect();

    let all = geometry::neighbors(rank, connectivity);
    let backward = geometry::select_backward(&all, axis);
    let backward_offsets = geometry::compute_offsets(&backward, &strides);
    let line_stride = strides[axis];

    let mut regions = RegionTable::new();
    let reserved = regions.create(0)?; // the label 1 sentinel; retired below
    debug_assert_eq!(reserved, 1);

    for line_coord in line_starts(sizes, axis) {
        // Neighbors valid for every interior pixel on this line: only the *other* axes matter,
        // since the axis-`p` component is handled by the first/last-pixel special cases below.
        let mut probe = line_coord.clone();
        probe[axis] = 1;
        let mut all_neighbors: Vec<isize> = Vec::new();
        let mut forward_neighbors: Vec<isize> = Vec::new();
        for (d, &off) in backward.iter().zip(&backward_offsets) {
            if geometry::is_previous(d, axis) {
                continue;
            }
            if geometry::in_image(d, &probe, sizes) {
                all_neighbors.push(off);
                if !geometry::shifted_is_in_neighborhood(d, axis, connectivity) {
                    forward_neighbors.push(off);
                }
            }
        }

        let base = flat_offset(&line_coord, &strides);
        let mut last_label: LabelType = 0;

        // First pixel.
        {
            let idx = base as usize;
            if labels[idx] != 0 {
                last_label = scan_all_backward(&labels, idx, &backward, &backward_offsets, &line_coord, sizes, &mut regions)?;
                labels[idx] = last_label;
            }
        }

        // Interior pixels.
        for p in 1..len - 1 {
            let idx = (base + line_stride * p as isize) as usize;
            if labels[idx] != 0 {
                if last_label != 0 {
                    for &off in &forward_neighbors {
                        let lab = labels[(idx as isize + off) as usize];
                        if lab != 0 {
                            last_label = regions.union(last_label, lab);
                        }
                    }
                    *regions.value_mut(last_label) += 1;
                } else {
                    for &off in &all_neighbors {
                        let lab = labels[(idx as isize + off) as usize];
                        if lab != 0 {
                            last_label =
                                if last_label != 0 { regions.union(last_label, lab) } else { lab };
                        }
                    }
                    last_label = if last_label != 0 {
                        *regions.value_mut(last_label) += 1;
                        last_label
                    } else {
                        regions.create(1)?
                    };
                }
                labels[idx] = last_label;
            } else {
                last_label = 0;
            }
        }

        // Last pixel.
        {
            let idx = (base + line_stride * (len as isize - 1)) as usize;
            if labels[idx] != 0 {
                let mut last_coord = line_coord.clone();
                last_coord[axis] = len - 1;
                let lbl = scan_all_backward(&labels, idx, &backward, &backward_offsets, &last_coord, sizes, &mut regions)?;
                labels[idx] = lbl;
            }
        }
    }

    regions.union(0, reserved);
    Ok((labels, regions))
}

/// Shared by the first- and last-pixel special cases: inspects every backward neighbor that is
/// in-image at `coord`, folding any labeled ones into a single survivor via `union`, then either
/// bumps its accumulator or creates a fresh region.
fn scan_all_backward(
    labels: &[LabelType],
    idx: usize,
    backward: &[geometry::Displacement],
    backward_offsets: &[isize],
    coord: &[usize],
    sizes: &[usize],
    regions: &mut RegionTable,
) -> Result<LabelType> {
    let mut found: LabelType = 0;
    for (d, &off) in backward.iter().zip(backward_offsets) {
        if geometry::in_image(d, coord, sizes) {
            let lab = labels[(idx as isize + off) as usize];
            if lab != 0 {
                found = if found != 0 { regions.union(found, lab) } else { lab };
            }
        }
    }
    if found != 0 {
        *regions.value_mut(found) += 1;
        Ok(found)
    } else {
        regions.create(1)
    }
}

/// Brute-force fallback for images whose optimal axis is shorter than 3 pixels (and therefore,
/// per `optimal_axis`'s choice of the largest axis, every axis is). Directly compares every
/// foreground pixel against every foreground pixel already seen, rather than relying on the
/// scan-line neighbor split; quadratic in the foreground pixel count, which is acceptable
/// because such images are tiny in every dimension.
pub(crate) fn tiny(
    sizes: &[usize],
    foreground: &[bool],
    connectivity: usize,
) -> Result<(Vec<LabelType>, RegionTable)> {
    let strides = c_strides(sizes);
    let total: usize = sizes.iter().product();
    let mut labels = vec![0 as LabelType; total];
    let mut regions = RegionTable::new();

    let mut seen: Vec<Vec<usize>> = Vec::new();
    for flat in 0..total {
        if !foreground[flat] {
            continue;
        }
        let coord = unravel(flat, sizes);
        if labels[flat] == 0 {
            labels[flat] = regions.create(1)?;
        }
        for prev in &seen {
            if adjacent(&coord, prev, connectivity) {
                let prev_flat = flat_offset(prev, &strides) as usize;
                let merged = regions.union(labels[flat], labels[prev_flat]);
                labels[flat] = merged;
            }
        }
        seen.push(coord);
    }
    Ok((labels, regions))
}

fn adjacent(a: &[usize], b: &[usize], connectivity: usize) -> bool {
    let mut nonzero = 0;
    for (&x, &y) in a.iter().zip(b) {
        let d = x as isize - y as isize;
        if d.abs() > 1 {
            return false;
        }
        if d != 0 {
            nonzero += 1;
        }
    }
    nonzero != 0 && nonzero <= connectivity
}

/// Row-major (`C`-order) strides for a shape, independent of any `ndarray` array's actual memory
/// layout.
pub(crate) fn c_strides(sizes: &[usize]) -> Vec<isize> {
    let n = sizes.len();
    let mut strides = vec![1isize; n];
    for i in (0..n.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * sizes[i + 1] as isize;
    }
    strides
}

pub(crate) fn flat_offset(coord: &[usize], strides: &[isize]) -> isize {
    coord.iter().zip(strides).map(|(&c, &s)| c as isize * s).sum()
}

fn unravel(mut flat: usize, sizes: &[usize]) -> Vec<usize> {
    let n = sizes.len();
    let mut coord = vec![0usize; n];
    for i in (0..n).rev() {
        coord[i] = flat % sizes[i];
        flat /= sizes[i];
    }
    coord
}

/// The axis maximizing `sizes[axis]`, breaking ties toward the highest index so that, for the
/// common case of all axes equal, the scan's outer loops run over the lower axes in ascending
/// order — the same traversal order `ArrayBase::iter()` itself uses.
pub(crate) fn optimal_axis(sizes: &[usize]) -> usize {
    let mut best = 0;
    for i in 1..sizes.len() {
        if sizes[i] >= sizes[best] {
            best = i;
        }
    }
    best
}

/// Every coordinate at which a scan line along `axis` begins (i.e. every combination of the
/// other axes, with `axis` itself fixed at 0).
pub(crate) fn line_starts(sizes: &[usize], axis: usize) -> Vec<Vec<usize>> {
    let rank = sizes.len();
    let other_axes: Vec<usize> = (0..rank).filter(|&i| i != axis).collect();
    if other_axes.is_empty() {
        return vec![vec![0; rank]];
    }

    let mut out = Vec::new();
    let mut idx = vec![0usize; other_axes.len()];
    loop {
        let mut coord = vec![0usize; rank];
        for (&ax, &v) in other_axes.iter().zip(&idx) {
            coord[ax] = v;
        }
        out.push(coord);

        let mut k = other_axes.len();
        loop {
            if k == 0 {
                return out;
            }
            k -= 1;
            idx[k] += 1;
            if idx[k] < sizes[other_axes[k]] {
                break;
            }
            idx[k] = 0;
            if k == 0 {
                return out;
            }
        }
    }
}
