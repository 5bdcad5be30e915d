use log::warn;
use crate::broad_phase::{BodyProxy, CollisionQuery};
use crate::models::Bounds;
use crate::utils::{SimulationConfig, Vector3};

/// Axis-aligned cube covered by an octree node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeBounds {
    pub center: Vector3,
    /// Full edge length.
    pub size: f64,
}

impl OctreeBounds {
    pub fn new(center: Vector3, size: f64) -> Self {
        Self { center, size }
    }

    /// Whether the cube around `bounds` (half extent = its radius) lies inside this cube.
    ///
    /// The lower faces are inclusive and the upper faces exclusive, so a body sitting
    /// exactly on the split plane between two children belongs to the upper one only.
    pub fn contains_perfectly(&self, bounds: &Bounds) -> bool {
        let half = self.size / 2.0;
        let inside = |object: f64, node: f64| {
            object - bounds.radius >= node - half && object + bounds.radius < node + half
        };
        inside(bounds.center.0, self.center.0)
            && inside(bounds.center.1, self.center.1)
            && inside(bounds.center.2, self.center.2)
    }

    /// Bounds of child `index`: bit 0 picks +x, bit 1 picks +y, bit 2 picks +z.
    pub fn octant(&self, index: usize) -> OctreeBounds {
        let size = self.size / 2.0;
        let offset = |bit: usize| if index & bit != 0 { size / 2.0 } else { -size / 2.0 };
        OctreeBounds {
            center: (self.center.0 + offset(1), self.center.1 + offset(2), self.center.2 + offset(4)),
            size,
        }
    }
}

fn set_bit(mask: u8, position: usize) -> u8 {
    mask | (1 << position)
}

fn test_bit(mask: u8, position: usize) -> bool {
    mask & (1 << position) != 0
}

#[derive(Debug, Clone, PartialEq)]
pub struct OctreeNode {
    pub bounds: OctreeBounds,
    pub depth: usize,
    pub max_depth: usize,
    /// Bodies that fit this node but none of its children.
    pub objects: Vec<BodyProxy>,
    /// Empty until the node is first subdivided, then always eight.
    pub children: Vec<OctreeNode>,
    /// Bit `i` is set when child `i` holds at least one body somewhere below it.
    pub child_bitmask: u8,
}

impl OctreeNode {
    pub fn new(bounds: OctreeBounds, depth: usize, max_depth: usize) -> Self {
        Self {
            bounds,
            depth,
            max_depth,
            objects: Vec::new(),
            children: Vec::new(),
            child_bitmask: 0,
        }
    }

    /// Splits the node into its eight octants, in bit order.
    pub fn subdivide(&mut self) {
        self.children = (0..8)
            .map(|i| OctreeNode::new(self.bounds.octant(i), self.depth + 1, self.max_depth))
            .collect();
    }

    pub fn contains_perfectly(&self, bounds: &Bounds) -> bool {
        self.bounds.contains_perfectly(bounds)
    }

    /// Pushes `proxy` down to the deepest node that contains it entirely.
    ///
    /// # Returns
    /// `false` when the body fits neither this node nor any child. The proxy is then
    /// not stored, which can only happen at the root.
    pub fn insert(&mut self, proxy: BodyProxy) -> bool {
        if self.depth >= self.max_depth {
            self.objects.push(proxy);
            return true;
        }

        if self.children.is_empty() {
            self.subdivide();
        }

        if let Some(index) = self.children.iter().position(|child| child.contains_perfectly(&proxy.bounds)) {
            self.child_bitmask = set_bit(self.child_bitmask, index);
            return self.children[index].insert(proxy);
        }

        if self.contains_perfectly(&proxy.bounds) {
            self.objects.push(proxy);
            true
        } else {
            false
        }
    }

    /// Collects collisions from this node and everything below it.
    ///
    /// Pairs within the node are tested once each. Then every inherited
    /// `parent_objects` entry is tested against every object here. Marked children
    /// receive `parent_objects` plus this node's objects, so each pair in the tree is
    /// tested exactly once. Pairs of fixed bodies are skipped.
    pub fn check_collisions<C, F>(&self, parent_objects: &[BodyProxy], detect: &mut F) -> CollisionQuery<C>
    where
        F: FnMut(&BodyProxy, &BodyProxy) -> Option<C>,
    {
        let mut query = CollisionQuery::default();

        for i in 1..self.objects.len() {
            for j in 0..i {
                let (later, earlier) = (&self.objects[i], &self.objects[j]);
                if later.can_interact_with(earlier) {
                    query.test_pair(later, earlier, detect);
                }
            }
        }

        for parent in parent_objects {
            for object in &self.objects {
                if parent.can_interact_with(object) {
                    query.test_pair(parent, object, detect);
                }
            }
        }

        if self.child_bitmask != 0 {
            let mut inherited = parent_objects.to_vec();
            inherited.extend_from_slice(&self.objects);
            for (i, child) in self.children.iter().enumerate() {
                if test_bit(self.child_bitmask, i) {
                    query.merge(child.check_collisions(&inherited, detect));
                }
            }
        }

        query
    }

    /// Number of bodies stored in this node and all of its descendants.
    pub fn object_count(&self) -> usize {
        self.objects.len() + self.children.iter().map(OctreeNode::object_count).sum::<usize>()
    }
}

/// Loose octree over a fixed cubic region, rebuilt from scratch every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Octree {
    root: OctreeNode,
}

impl Octree {
    pub fn new(center: Vector3, size: f64, max_depth: usize) -> Self {
        Self { root: OctreeNode::new(OctreeBounds::new(center, size), 0, max_depth) }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.octree_center, config.octree_size, config.octree_max_depth)
    }

    /// Builds a tree holding every proxy.
    pub fn build(center: Vector3, size: f64, max_depth: usize, proxies: impl IntoIterator<Item = BodyProxy>) -> Self {
        let mut octree = Self::new(center, size, max_depth);
        for proxy in proxies {
            octree.insert(proxy);
        }
        octree
    }

    /// Inserts a body. A body reaching outside the root region is kept at the root so it
    /// is still tested against everything, just without any pruning.
    pub fn insert(&mut self, proxy: BodyProxy) {
        if !self.root.insert(proxy) {
            warn!(
                "Body {} at {:?} (radius {}) does not fit the octree root {:?}, keeping it at the root",
                proxy.handle, proxy.bounds.center, proxy.bounds.radius, self.root.bounds
            );
            self.root.objects.push(proxy);
        }
    }

    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.root.object_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn check_collisions<C, F>(&self, mut detect: F) -> CollisionQuery<C>
    where
        F: FnMut(&BodyProxy, &BodyProxy) -> Option<C>,
    {
        self.root.check_collisions(&[], &mut detect)
    }
}
