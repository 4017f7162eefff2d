//! The label region table: a disjoint-set forest over label identifiers, where each
//! representative carries an accumulator (by default, the region's pixel count).
//!
//! Index `0` is a reserved sentinel for "background" (`parent(0) == 0`); real regions start at
//! label `1`. The forest invariant `parent(l) <= l` (with equality iff `l` is a representative)
//! lets [`RegionTable::relabel`] assign dense output ids in a single ascending pass.

use crate::error::{LabelError, Result};

/// The label type produced by [`crate::label`]. 32 bits comfortably satisfies the
/// specification's requirement of at least 2^31 distinct labels.
pub type LabelType = u32;

/// A disjoint-set forest of labels, each representative carrying a `usize` accumulator.
pub struct RegionTable {
    parent: Vec<LabelType>,
    value: Vec<usize>,
    dense: Vec<LabelType>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTable {
    /// Creates an empty table, already containing the background sentinel at index 0.
    pub fn new() -> Self {
        RegionTable { parent: vec![0], value: vec![0], dense: Vec::new() }
    }

    /// Allocates a new representative with accumulator `v` and returns its label id.
    pub fn create(&mut self, v: usize) -> Result<LabelType> {
        let id = self.parent.len();
        if id > LabelType::MAX as usize {
            return Err(LabelError::LabelOverflow { max: LabelType::MAX });
        }
        let id = id as LabelType;
        self.parent.push(id);
        self.value.push(v);
        Ok(id)
    }

    /// Returns the representative of `l`'s equivalence class, compressing the path to it.
    pub fn find(&mut self, l: LabelType) -> LabelType {
        let mut root = l;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = l;
        while cur != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Unions the equivalence classes of `a` and `b`, merging their accumulators by simple
    /// addition. Returns the surviving representative (the smaller of the two roots).
    pub fn union(&mut self, a: LabelType, b: LabelType) -> LabelType {
        self.union_with(a, b, |x, y| x + y)
    }

    /// Like [`RegionTable::union`], but merges the two accumulators with a caller-supplied
    /// function instead of addition. `merge` must be commutative and associative across a
    /// sequence of unions for the result to be order-independent.
    pub fn union_with<F>(&mut self, a: LabelType, b: LabelType, merge: F) -> LabelType
    where
        F: FnOnce(usize, usize) -> usize,
    {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (survivor, other) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[other as usize] = survivor;
        self.value[survivor as usize] = merge(self.value[survivor as usize], self.value[other as usize]);
        survivor
    }

    /// Mutable access to the accumulator of `l`'s representative. Resolves `l` to its root first,
    /// so `l` itself need not already be a representative.
    pub fn value_mut(&mut self, l: LabelType) -> &mut usize {
        let r = self.find(l);
        &mut self.value[r as usize]
    }

    /// Enumerates representatives in ascending id order; each surviving one (`pred(value)` holds,
    /// and it is not the background sentinel) gets a dense id starting at 1, others get 0.
    /// Non-representatives inherit their representative's dense id. Returns the number of kept
    /// regions (the final `nLabel`).
    ///
    /// After this call, [`RegionTable::translate`] returns the dense id for any label, including
    /// labels that were never representatives.
    pub fn relabel<P>(&mut self, pred: P) -> usize
    where
        P: Fn(usize) -> bool,
    {
        let n = self.parent.len();
        let mut dense = vec![0 as LabelType; n];
        let mut next = 1 as LabelType;
        for l in 1..n as LabelType {
            let root = self.find(l);
            if root == l {
                if pred(self.value[l as usize]) {
                    dense[l as usize] = next;
                    next += 1;
                }
            } else {
                // `root < l` by the forest invariant, so it was already assigned above.
                dense[l as usize] = dense[root as usize];
            }
        }
        self.dense = dense;
        (next - 1) as usize
    }

    /// Translates a raw label produced by the first pass into its dense output id. Only valid
    /// after [`RegionTable::relabel`] has been called.
    pub fn translate(&self, l: LabelType) -> LabelType {
        self.dense[l as usize]
    }
}
