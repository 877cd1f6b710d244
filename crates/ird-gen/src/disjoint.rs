//! Union-find over arbitrary hashable elements.

use std::hash::Hash;

use indexmap::IndexSet;

/// Disjoint sets with union by rank and path compression.
///
/// Elements are interned in insertion order; the structure tracks the
/// number of distinct sets so connectivity checks are O(1).
#[derive(Clone, Debug)]
pub struct DisjointSets<T> {
    elements: IndexSet<T>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_sets: usize,
}

impl<T: Eq + Hash> DisjointSets<T> {
    /// An empty structure.
    pub fn new() -> Self {
        Self {
            elements: IndexSet::new(),
            parent: Vec::new(),
            rank: Vec::new(),
            num_sets: 0,
        }
    }

    /// Add `x` as its own set. Returns `false` if it was already present.
    pub fn add_singleton(&mut self, x: T) -> bool {
        let (i, inserted) = self.elements.insert_full(x);
        if inserted {
            self.parent.push(i);
            self.rank.push(0);
            self.num_sets += 1;
        }
        inserted
    }

    /// Whether `x` has been added.
    pub fn contains(&self, x: &T) -> bool {
        self.elements.contains(x)
    }

    /// Representative element of the set containing `x`.
    pub fn find(&mut self, x: &T) -> Option<&T> {
        let i = self.elements.get_index_of(x)?;
        let root = self.root(i);
        self.elements.get_index(root)
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `true` if two distinct sets were merged, `false` if either
    /// element is missing or both already share a set.
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let (Some(i), Some(j)) = (self.elements.get_index_of(a), self.elements.get_index_of(b))
        else {
            return false;
        };
        let (ri, rj) = (self.root(i), self.root(j));
        if ri == rj {
            return false;
        }
        match self.rank[ri].cmp(&self.rank[rj]) {
            std::cmp::Ordering::Less => self.parent[ri] = rj,
            std::cmp::Ordering::Greater => self.parent[rj] = ri,
            std::cmp::Ordering::Equal => {
                self.parent[rj] = ri;
                self.rank[ri] = self.rank[ri].saturating_add(1);
            }
        }
        self.num_sets -= 1;
        true
    }

    /// Number of elements added.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of distinct sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Whether every element is in one set. An empty structure is not
    /// connected.
    pub fn is_connected(&self) -> bool {
        self.num_sets == 1
    }

    fn root(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[i] != root {
            let next = self.parent[i];
            self.parent[i] = root;
            i = next;
        }
        root
    }
}

impl<T: Eq + Hash> Default for DisjointSets<T> {
    fn default() -> Self {
        Self::new()
    }
}
