//! Collision detection and merging.
//!
//! Resolution is collect-then-apply. First every overlapping pair is found
//! against a fixed snapshot of the system. Pairs are then joined into groups
//! with a disjoint-set forest, so chains (a hits b, b hits c) end up as one
//! body. Within a group the earliest body in collection order survives and
//! absorbs the others in collection order. Absorbed bodies are dropped with a
//! single `retain` at the end.

use tracing::info;

use super::states::{Body, System};

/// One absorption performed by [`resolve_collisions`]
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    pub survivor: String,
    pub absorbed: String,
}

/// Merge `other` into `body`, conserving mass and linear momentum.
///
/// The merged radius assumes constant density, so volumes add. The merged
/// position is the centre of mass of the pair.
pub fn merge_bodies(body: &mut Body, other: &Body) {
    let total = body.m + other.m;

    body.v = (body.m * body.v + other.m * other.v) / total;
    body.x = (body.m * body.x + other.m * other.x) / total;
    body.radius = (body.radius.powi(3) + other.radius.powi(3)).cbrt();
    body.m = total;
}

/// All overlapping index pairs `(i, j)`, `i < j`, in enumeration order.
pub fn find_collisions(sys: &System) -> Vec<(usize, usize)> {
    let n = sys.bodies.len();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if sys.bodies[i].collides_with(&sys.bodies[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Disjoint-set forest over body indices. The root of every set is its
/// smallest index, which makes the survivor of a group the earliest body.
struct Groups {
    parent: Vec<usize>,
}

impl Groups {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

/// Merge every group of overlapping bodies into its earliest member.
///
/// Returns the merges in the order they were applied; empty when nothing
/// overlapped.
pub fn resolve_collisions(sys: &mut System) -> Vec<MergeEvent> {
    let pairs = find_collisions(sys);
    if pairs.is_empty() {
        return Vec::new();
    }

    let n = sys.bodies.len();
    let mut groups = Groups::new(n);
    for &(i, j) in &pairs {
        groups.union(i, j);
    }

    let mut events = Vec::new();
    let mut absorbed = vec![false; n];
    for j in 0..n {
        let root = groups.find(j);
        if root == j {
            continue;
        }

        // root < j always, so split the slice to borrow both
        let (head, tail) = sys.bodies.split_at_mut(j);
        let survivor = &mut head[root];
        let other = &tail[0];
        merge_bodies(survivor, other);

        info!(
            survivor = %survivor.key,
            absorbed = %other.key,
            mass = survivor.m,
            radius = survivor.radius,
            "bodies merged"
        );
        events.push(MergeEvent {
            survivor: survivor.key.clone(),
            absorbed: other.key.clone(),
        });
        absorbed[j] = true;
    }

    let mut idx = 0;
    sys.bodies.retain(|_| {
        let keep = !absorbed[idx];
        idx += 1;
        keep
    });

    events
}
