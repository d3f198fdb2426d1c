use tabula_core::Target;

use crate::error::{KnnError, KnnResult};

/// A candidate neighbour: its target and squared distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbour {
    pub target: Target,
    pub distance: f64,
}

/// The `k` closest targets seen so far, sorted by ascending distance.
///
/// While fewer than `k` neighbours are held every candidate is accepted;
/// once full, [`max_distance`](Self::max_distance) is the k-th smallest
/// distance and only strictly closer candidates get in.
#[derive(Debug, Clone)]
pub struct NeighbourCollection {
    k: usize,
    neighbours: Vec<Neighbour>,
}

impl NeighbourCollection {
    pub fn new(k: usize) -> KnnResult<Self> {
        if k < 1 {
            return Err(KnnError::InvalidNumberOfNeighbours { k });
        }
        Ok(NeighbourCollection {
            k,
            neighbours: Vec::with_capacity(k + 1),
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.neighbours.len() >= self.k
    }

    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    /// Prune threshold: `f64::MAX` until full, then the k-th smallest distance.
    pub fn max_distance(&self) -> f64 {
        if self.is_full() {
            self.neighbours[self.k - 1].distance
        } else {
            f64::MAX
        }
    }

    /// Whether a candidate at `distance` would be kept by [`insert`](Self::insert).
    ///
    /// Anything is kept until the collection is full; after that only
    /// candidates strictly closer than `max_distance()`.
    pub fn accepts(&self, distance: f64) -> bool {
        !self.is_full() || rank(distance) < rank(self.max_distance())
    }

    /// Insert a candidate, keeping the list sorted and at most `k` long.
    ///
    /// Rejected candidates are dropped and `false` is returned. Equal
    /// distances go after the entries already held, and NaN sorts last.
    pub fn insert(&mut self, target: Target, distance: f64) -> bool {
        if !self.accepts(distance) {
            return false;
        }
        let key = rank(distance);
        let at = self.neighbours.partition_point(|n| rank(n.distance) <= key);
        self.neighbours.insert(at, Neighbour { target, distance });
        self.neighbours.truncate(self.k);
        true
    }

    /// Majority vote over the retained targets.
    ///
    /// Ties go to the target seen first in ascending-distance order.
    pub fn vote(self) -> KnnResult<Target> {
        let mut neighbours = self.neighbours;

        // (index of first occurrence, count), in order of first occurrence
        let mut tallies: Vec<(usize, usize)> = Vec::new();
        for (i, candidate) in neighbours.iter().enumerate() {
            match tallies
                .iter_mut()
                .find(|(first, _)| neighbours[*first].target == candidate.target)
            {
                Some((_, count)) => *count += 1,
                None => tallies.push((i, 1)),
            }
        }

        let mut winner: Option<(usize, usize)> = None;
        for &(first, count) in &tallies {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((first, count));
            }
        }

        match winner {
            Some((first, _)) => Ok(neighbours.swap_remove(first).target),
            None => Err(KnnError::EmptyVote),
        }
    }
}

// NaN orders after every distance.
fn rank(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}
