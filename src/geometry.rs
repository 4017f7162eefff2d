//! Enumerates the neighbor displacement vectors of a city-block connectivity neighborhood and
//! the bookkeeping (backward half, offsets, in-image tests) the first-pass scanners need around
//! them.
//!
//! A *displacement* is a vector `d` of rank `n` with every component in `{-1, 0, 1}`. It is part
//! of the connectivity-`k` neighborhood iff it is not the zero vector and its L1 (Manhattan) norm
//! — equivalently here, since components are in `{-1,0,1}`, the count of nonzero components — is
//! at most `k`.

/// One neighbor displacement, one component per axis, each in `{-1, 0, 1}`.
pub type Displacement = Vec<isize>;

/// Enumerates the displacement vectors of the connectivity-`k` neighborhood for rank `n`, in a
/// stable, reproducible (lexicographic) order: component 0 varies slowest.
///
/// `connectivity` must be in `1..=n`; callers are expected to have validated this already (see
/// [`crate::error::LabelError::ParameterOutOfRange`]).
pub fn neighbors(n: usize, connectivity: usize) -> Vec<Displacement> {
    let mut out = Vec::with_capacity(3usize.pow(n as u32) - 1);
    let mut d = vec![-1isize; n];
    loop {
        let nonzero = d.iter().filter(|&&c| c != 0).count();
        if nonzero != 0 && nonzero <= connectivity {
            out.push(d.clone());
        }
        // Odometer increment, least significant (last) axis first.
        let mut i = n;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if d[i] < 1 {
                d[i] += 1;
                break;
            }
            d[i] = -1;
            if i == 0 {
                return out;
            }
        }
    }
}

/// Returns the subset of `seq` that is *backward*: the pixel it points at was already visited by
/// a raster scan that uses `axis` as the innermost (fastest-varying) loop.
///
/// Concretely, reorder each displacement's components so that every axis other than `axis`
/// appears first (in ascending index order) and `axis` appears last, then keep the displacements
/// whose first nonzero entry, in that reordered view, is negative. That is exactly the set of
/// positions visited before the current one under such a scan.
pub fn select_backward(seq: &[Displacement], axis: usize) -> Vec<Displacement> {
    seq.iter()
        .filter(|d| is_backward(d, axis))
        .cloned()
        .collect()
}

fn is_backward(d: &[isize], axis: usize) -> bool {
    for (i, &c) in d.iter().enumerate() {
        if i == axis {
            continue;
        }
        if c != 0 {
            return c < 0;
        }
    }
    d[axis] < 0
}

/// Computes the element offset `sum(d_i * strides_i)` for each displacement in `seq`.
pub fn compute_offsets(seq: &[Displacement], strides: &[isize]) -> Vec<isize> {
    seq.iter()
        .map(|d| d.iter().zip(strides).map(|(&di, &si)| di * si).sum())
        .collect()
}

/// True iff `coord + d` lies within `[0, sizes)` on every axis.
pub fn in_image(d: &[isize], coord: &[usize], sizes: &[usize]) -> bool {
    d.iter().zip(coord).zip(sizes).all(|((&di, &ci), &si)| {
        let pos = ci as isize + di;
        pos >= 0 && (pos as usize) < si
    })
}

/// True iff `d` is exactly the immediate predecessor along `axis` (`d_axis = -1`, all other
/// components zero).
pub fn is_previous(d: &[isize], axis: usize) -> bool {
    d.iter().enumerate().all(|(i, &c)| if i == axis { c == -1 } else { c == 0 })
}

/// True iff shifting `d` by `+1` along `axis` keeps it inside the connectivity-`k` neighborhood
/// (and it does not become the zero vector). Used to split backward neighbors into
/// `same_neighbors` (already reflected through the line predecessor's label) and
/// `forward_neighbors` (genuinely new).
pub fn shifted_is_in_neighborhood(d: &[isize], axis: usize, connectivity: usize) -> bool {
    let mut shifted = d.to_vec();
    shifted[axis] += 1;
    let nonzero = shifted.iter().filter(|&&c| c != 0).count();
    nonzero != 0 && nonzero <= connectivity
}
