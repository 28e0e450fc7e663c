use std::collections::VecDeque;

use log::debug;
use rayon::prelude::*;

use crate::errors::KernelError;
use crate::geometry::{min_enclosing_disc, Disc};
use crate::kernel::Particle;
use crate::models::Point2D;
use crate::multipole::{repulsive_force, MultipoleCoefficients};

/// Split axis of a leaf. Wide leaves split horizontally, tall leaves split
/// vertically, which keeps nodes roughly square and their bounding discs
/// tight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal = 0,
    Vertical = 1,
}

impl Axis {
    fn coordinate(self, p: Point2D) -> f64 {
        match self {
            Axis::Horizontal => p.x,
            Axis::Vertical => p.y,
        }
    }

    fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A leaf holds its member particle indices in two parallel orderings, one
/// sorted per axis, so splits never re-sort.
#[derive(Debug)]
struct LeafData {
    members: [Vec<usize>; 2],
    disc: Disc,
    coefficients: Option<MultipoleCoefficients>,
}

impl LeafData {
    fn new(members: [Vec<usize>; 2], points: &[Point2D]) -> Result<Self, KernelError> {
        let member_points: Vec<Point2D> = members[0].iter().map(|&i| points[i]).collect();
        let disc = min_enclosing_disc(&member_points)?.disc;
        Ok(LeafData {
            members,
            disc,
            coefficients: None,
        })
    }

    fn len(&self) -> usize {
        self.members[0].len()
    }

    /// Coordinate range of the members along `axis`; the orderings make this
    /// a first/last lookup.
    fn extent(&self, points: &[Point2D], axis: Axis) -> f64 {
        let order = &self.members[axis as usize];
        axis.coordinate(points[order[order.len() - 1]]) - axis.coordinate(points[order[0]])
    }
}

#[derive(Debug)]
struct InternalData {
    left: usize,
    right: usize,
    disc: Disc,
    coefficients: Option<MultipoleCoefficients>,
}

/// A tree node, addressed by arena index.
#[derive(Debug)]
enum KdNode {
    Leaf(LeafData),
    Internal(InternalData),
}

impl KdNode {
    fn disc(&self) -> &Disc {
        match self {
            KdNode::Leaf(l) => &l.disc,
            KdNode::Internal(n) => &n.disc,
        }
    }

    fn coefficients(&self) -> Option<&MultipoleCoefficients> {
        match self {
            KdNode::Leaf(l) => l.coefficients.as_ref(),
            KdNode::Internal(n) => n.coefficients.as_ref(),
        }
    }

    /// Transient value used while a leaf's slot is being rewritten as an
    /// internal node.
    fn placeholder() -> KdNode {
        KdNode::Leaf(LeafData {
            members: [Vec::new(), Vec::new()],
            disc: Disc::from_point(Point2D::ZERO),
            coefficients: None,
        })
    }
}

/// Counters describing one force-computation pass, returned so callers and
/// tests can observe how much work the admissibility pruning avoided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForceStats {
    /// Exact pairwise force evaluations performed (near field).
    pub near_field_pairs: usize,
    /// Multipole expansion evaluations performed (far field).
    pub far_field_evaluations: usize,
    /// Number of leaves in the tree.
    pub leaf_count: usize,
}

/// A balanced spatial partition tree over 2D particles.
///
/// Particles are recursively divided into a binary tree by median splits
/// along the wider axis until every leaf holds at most `bucket_size` members.
/// Each node carries the minimum enclosing disc of its subtree, used as the
/// admissibility volume for far-field approximation, and (once computed) a
/// multipole expansion of its subtree's aggregate repulsion.
///
/// The tree is rebuilt from scratch for every force-computation pass; nothing
/// in it outlives one call.
#[derive(Debug)]
pub struct KdTree {
    points: Vec<Point2D>,
    nodes: Vec<KdNode>,
    root: usize,
    leaves: Vec<usize>,
    bucket_size: usize,
}

impl KdTree {
    /// Builds the tree over the positions of `particles` with leaves of at
    /// most `bucket_size` members. O(n log n): both axis orderings are sorted
    /// once up front and every split is a linear pass over the leaf.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::EmptyPointSet`] for empty input and
    /// [`KernelError::InvalidBucketSize`] for a zero bucket size.
    pub fn build(particles: &[Particle], bucket_size: usize) -> Result<Self, KernelError> {
        if particles.is_empty() {
            return Err(KernelError::EmptyPointSet);
        }
        if bucket_size == 0 {
            return Err(KernelError::InvalidBucketSize(bucket_size));
        }
        let points: Vec<Point2D> = particles.iter().map(|p| p.point).collect();
        let n = points.len();

        let mut by_x: Vec<usize> = (0..n).collect();
        by_x.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x));
        let mut by_y: Vec<usize> = (0..n).collect();
        by_y.sort_by(|&a, &b| points[a].y.total_cmp(&points[b].y));

        let root_leaf = LeafData::new([by_x, by_y], &points)?;
        let mut nodes = vec![KdNode::Leaf(root_leaf)];
        let mut split_left = vec![false; n];
        let mut queue = VecDeque::new();
        if n > bucket_size {
            queue.push_back(0);
        }
        while let Some(id) = queue.pop_front() {
            let (left, right) = Self::split_leaf(&mut nodes, &points, &mut split_left, id)?;
            for child in [left, right] {
                if let KdNode::Leaf(leaf) = &nodes[child] {
                    if leaf.len() > bucket_size {
                        queue.push_back(child);
                    }
                }
            }
        }

        let leaves: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| matches!(node, KdNode::Leaf(_)))
            .map(|(id, _)| id)
            .collect();
        debug!(
            "built kd-tree over {} particles: {} nodes, {} leaves, bucket size {}",
            n,
            nodes.len(),
            leaves.len(),
            bucket_size
        );
        Ok(KdTree {
            points,
            nodes,
            root: 0,
            leaves,
            bucket_size,
        })
    }

    /// Splits the leaf at `id` along its wider axis into two halves of
    /// `⌊n/2⌋` and `n − ⌊n/2⌋` members and rewrites the slot as an internal
    /// node over the two new leaves. The parent keeps the old leaf's disc;
    /// both halves get fresh minimum enclosing discs.
    fn split_leaf(
        nodes: &mut Vec<KdNode>,
        points: &[Point2D],
        split_left: &mut [bool],
        id: usize,
    ) -> Result<(usize, usize), KernelError> {
        // the slot is rewritten as an internal node below
        let leaf = match std::mem::replace(&mut nodes[id], KdNode::placeholder()) {
            KdNode::Leaf(leaf) => leaf,
            KdNode::Internal(_) => unreachable!("only leaves are queued for splitting"),
        };

        let axis = if leaf.extent(points, Axis::Horizontal) > leaf.extent(points, Axis::Vertical) {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        let secondary = axis.perpendicular();
        let n = leaf.len();
        let n_left = n / 2;

        let mut left = [
            Vec::with_capacity(n_left),
            Vec::with_capacity(n_left),
        ];
        let mut right = [
            Vec::with_capacity(n - n_left),
            Vec::with_capacity(n - n_left),
        ];
        for (i, &particle) in leaf.members[axis as usize].iter().enumerate() {
            if i < n_left {
                left[axis as usize].push(particle);
                split_left[particle] = true;
            } else {
                right[axis as usize].push(particle);
                split_left[particle] = false;
            }
        }
        // one stable pass over the parent's secondary ordering keeps both
        // halves sorted on that axis without re-sorting
        for &particle in &leaf.members[secondary as usize] {
            if split_left[particle] {
                left[secondary as usize].push(particle);
            } else {
                right[secondary as usize].push(particle);
            }
        }

        let left_leaf = LeafData::new(left, points)?;
        let right_leaf = LeafData::new(right, points)?;
        let left_id = nodes.len();
        nodes.push(KdNode::Leaf(left_leaf));
        let right_id = nodes.len();
        nodes.push(KdNode::Leaf(right_leaf));
        nodes[id] = KdNode::Internal(InternalData {
            left: left_id,
            right: right_id,
            disc: leaf.disc,
            coefficients: None,
        });
        Ok((left_id, right_id))
    }

    /// Computes multipole expansions for every node, leaves first, each
    /// internal node by merging its children's expansions at its own disc
    /// centre.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidPrecision`] if `precision` is zero.
    pub fn compute_multipole_coefficients(&mut self, precision: usize) -> Result<(), KernelError> {
        if precision == 0 {
            return Err(KernelError::InvalidPrecision(precision));
        }
        Self::compute_node_coefficients(&mut self.nodes, &self.points, self.root, precision)?;
        Ok(())
    }

    fn compute_node_coefficients(
        nodes: &mut [KdNode],
        points: &[Point2D],
        id: usize,
        precision: usize,
    ) -> Result<MultipoleCoefficients, KernelError> {
        let coefficients = match &nodes[id] {
            KdNode::Leaf(leaf) => {
                let member_points: Vec<Point2D> =
                    leaf.members[0].iter().map(|&i| points[i]).collect();
                MultipoleCoefficients::from_points(precision, leaf.disc.center(), &member_points)?
            }
            KdNode::Internal(internal) => {
                let (left, right, center) = (internal.left, internal.right, internal.disc.center());
                let left_coefficients =
                    Self::compute_node_coefficients(nodes, points, left, precision)?;
                let right_coefficients =
                    Self::compute_node_coefficients(nodes, points, right, precision)?;
                MultipoleCoefficients::merge(center, &left_coefficients, &right_coefficients)?
            }
        };
        match &mut nodes[id] {
            KdNode::Leaf(leaf) => leaf.coefficients = Some(coefficients.clone()),
            KdNode::Internal(internal) => internal.coefficients = Some(coefficients.clone()),
        }
        Ok(coefficients)
    }

    /// Accumulates the repulsive force on every particle, overwriting
    /// `particles[i].force`. Leaves are processed in parallel: each leaf
    /// reads the immutable tree and writes only the forces of its own
    /// members, so no locking is needed.
    ///
    /// Expansions must have been computed first; [`compute_forces`] is the
    /// usual entry point and sequences both steps.
    ///
    /// [`compute_forces`]: crate::kernel::compute_forces
    pub fn accumulate_forces(&self, particles: &mut [Particle]) -> ForceStats {
        debug_assert_eq!(particles.len(), self.points.len());
        for particle in particles.iter_mut() {
            particle.force = Point2D::ZERO;
        }
        let per_leaf: Vec<(usize, Vec<Point2D>, usize, usize)> = self
            .leaves
            .par_iter()
            .map(|&id| {
                let (forces, near, far) = self.evaluate_leaf(id);
                (id, forces, near, far)
            })
            .collect();
        let mut stats = ForceStats {
            leaf_count: self.leaves.len(),
            ..ForceStats::default()
        };
        for (id, forces, near, far) in per_leaf {
            if let KdNode::Leaf(leaf) = &self.nodes[id] {
                for (&member, force) in leaf.members[0].iter().zip(forces) {
                    particles[member].force = force;
                }
            }
            stats.near_field_pairs += near;
            stats.far_field_evaluations += far;
        }
        debug!(
            "force pass over {} particles: {} leaves, {} near-field pairs, {} far-field evaluations",
            self.points.len(),
            stats.leaf_count,
            stats.near_field_pairs,
            stats.far_field_evaluations
        );
        stats
    }

    /// Forces for the members of one leaf: exact pairs within the leaf, then
    /// a work-stack traversal from the root applying the disc-intersection
    /// admissibility test. Returns the per-member forces (parallel to the
    /// leaf's primary ordering) and the near/far evaluation counts.
    fn evaluate_leaf(&self, leaf_id: usize) -> (Vec<Point2D>, usize, usize) {
        let leaf = match &self.nodes[leaf_id] {
            KdNode::Leaf(leaf) => leaf,
            KdNode::Internal(_) => unreachable!("leaf ids always reference leaves"),
        };
        let members = &leaf.members[0];
        let mut forces = vec![Point2D::ZERO; members.len()];
        let mut near_field_pairs = 0;
        let mut far_field_evaluations = 0;

        for (i, &u) in members.iter().enumerate() {
            for &v in members.iter() {
                if u != v {
                    forces[i] += repulsive_force(self.points[u], self.points[v]);
                    near_field_pairs += 1;
                }
            }
        }

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !leaf.disc.intersects(node.disc()) {
                // admissible: the whole subtree acts through its expansion
                if let Some(coefficients) = node.coefficients() {
                    for (i, &u) in members.iter().enumerate() {
                        forces[i] += coefficients.approximate_force(self.points[u]);
                        far_field_evaluations += 1;
                    }
                }
            } else {
                match node {
                    KdNode::Leaf(other) => {
                        if id != leaf_id {
                            for (i, &u) in members.iter().enumerate() {
                                for &v in &other.members[0] {
                                    forces[i] += repulsive_force(self.points[u], self.points[v]);
                                    near_field_pairs += 1;
                                }
                            }
                        }
                    }
                    KdNode::Internal(internal) => {
                        stack.push(internal.left);
                        stack.push(internal.right);
                    }
                }
            }
        }
        (forces, near_field_pairs, far_field_evaluations)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Maximum members per leaf the tree was built with.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// The root node's expansion, once computed. Its zeroth term is the total
    /// particle count.
    pub fn root_coefficients(&self) -> Option<&MultipoleCoefficients> {
        self.nodes[self.root].coefficients()
    }

    /// Member indices of every leaf, in the leaves' primary orderings.
    #[cfg(test)]
    pub(crate) fn leaf_members(&self) -> Vec<Vec<usize>> {
        self.leaves
            .iter()
            .filter_map(|&id| match &self.nodes[id] {
                KdNode::Leaf(leaf) => Some(leaf.members[0].clone()),
                KdNode::Internal(_) => None,
            })
            .collect()
    }

    /// Secondary (per-axis) orderings of every leaf, for invariant checks.
    #[cfg(test)]
    pub(crate) fn leaf_secondary_members(&self) -> Vec<Vec<usize>> {
        self.leaves
            .iter()
            .filter_map(|&id| match &self.nodes[id] {
                KdNode::Leaf(leaf) => Some(leaf.members[1].clone()),
                KdNode::Internal(_) => None,
            })
            .collect()
    }

    /// Bounding disc of every leaf, for invariant checks.
    #[cfg(test)]
    pub(crate) fn leaf_discs(&self) -> Vec<Disc> {
        self.leaves
            .iter()
            .filter_map(|&id| match &self.nodes[id] {
                KdNode::Leaf(leaf) => Some(leaf.disc),
                KdNode::Internal(_) => None,
            })
            .collect()
    }
}
