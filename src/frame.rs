//! Joint and member topology of the structures the calculator can build.
//!
//! A frame is stored as a graph: joints are the top corners and the bases on
//! the ground, members are the top edges and the legs connecting them. The
//! calculator reads two things from it: how long each member group has to be
//! once the corner hardware has been deducted, and which corner kind each top
//! joint needs given how many members meet there.

use std::collections::BTreeMap;

use nalgebra::Point3;
use petgraph::graph::{Graph, NodeIndex};

use crate::catalog::PartKind;

/// Role a member plays in a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberRole {
    /// Top edge running along the length.
    Length,
    /// Top edge running along the width.
    Width,
    /// Vertical leg.
    Leg,
}

/// Hardware sitting at a joint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JointKind {
    /// Corner piece joining top edges and legs.
    Corner,
    /// Base plate on the ground.
    Base,
}

/// Internal representation of a frame joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position in metres.
    position: Point3<f64>,
    /// Hardware placed at the joint.
    kind: JointKind,
}

/// Internal representation of a frame member.
#[derive(Clone, Debug)]
struct Member {
    /// Role of the member.
    role: MemberRole,
    /// Length taken up by the hardware at the member's ends.
    deduction: f64,
}

/// Group of identical members sharing a role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanGroup {
    /// Role shared by the members.
    pub role: MemberRole,
    /// Length left for straight segments on each member.
    pub span: f64,
    /// Number of members in the group.
    pub replication: u32,
}

/// Joint and member layout of one structure.
#[derive(Debug, Default)]
pub struct Frame {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member>,
}

/// Depth of the corner piece along a top edge.
const CORNER_DEPTH: f64 = 0.5;

impl Frame {
    /// Four-legged rectangular frame with 3-way corners.
    ///
    /// Each top edge loses a corner at both ends; each leg loses the corner on top.
    ///
    /// # Examples
    /// ```
    /// use trusscalc::Frame;
    ///
    /// let frame = Frame::self_supporting(5.0, 3.0, 2.5);
    /// assert_eq!(frame.joint_count(), 8);
    /// assert_eq!(frame.member_count(), 8);
    /// ```
    #[must_use]
    pub fn self_supporting(length: f64, width: f64, height: f64) -> Self {
        let mut frame = Self::default();
        let corners = [
            frame.add_joint(Point3::new(0.0, 0.0, height), JointKind::Corner),
            frame.add_joint(Point3::new(length, 0.0, height), JointKind::Corner),
            frame.add_joint(Point3::new(length, width, height), JointKind::Corner),
            frame.add_joint(Point3::new(0.0, width, height), JointKind::Corner),
        ];
        let edge_deduction = 2.0 * CORNER_DEPTH;
        frame.add_member(corners[0], corners[1], MemberRole::Length, edge_deduction);
        frame.add_member(corners[3], corners[2], MemberRole::Length, edge_deduction);
        frame.add_member(corners[0], corners[3], MemberRole::Width, edge_deduction);
        frame.add_member(corners[1], corners[2], MemberRole::Width, edge_deduction);
        for corner in corners {
            let top = frame.graph[corner].position;
            let base = frame.add_joint(Point3::new(top.x, top.y, 0.0), JointKind::Base);
            frame.add_member(corner, base, MemberRole::Leg, CORNER_DEPTH);
        }
        frame
    }

    /// Two-legged arch with 2-way corners.
    ///
    /// The top edge loses a corner at both ends; each leg loses its corner and
    /// the same depth again at the base.
    #[must_use]
    pub fn arch(length: f64, height: f64) -> Self {
        let mut frame = Self::default();
        let left = frame.add_joint(Point3::new(0.0, 0.0, height), JointKind::Corner);
        let right = frame.add_joint(Point3::new(length, 0.0, height), JointKind::Corner);
        frame.add_member(left, right, MemberRole::Length, 2.0 * CORNER_DEPTH);
        for corner in [left, right] {
            let top = frame.graph[corner].position;
            let base = frame.add_joint(Point3::new(top.x, top.y, 0.0), JointKind::Base);
            frame.add_member(corner, base, MemberRole::Leg, 2.0 * CORNER_DEPTH);
        }
        frame
    }

    /// Return the number of joints.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Spans to fill with straight segments, grouped by role in role order.
    ///
    /// Members of a role are all the same length, so the first one found sets
    /// the span of its group.
    #[must_use]
    pub fn span_groups(&self) -> Vec<SpanGroup> {
        let mut groups: BTreeMap<MemberRole, SpanGroup> = BTreeMap::new();
        for edge in self.graph.edge_indices() {
            let Some((start, end)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let member = &self.graph[edge];
            let length = nalgebra::distance(
                &self.graph[start].position,
                &self.graph[end].position,
            );
            groups
                .entry(member.role)
                .and_modify(|group| group.replication += 1)
                .or_insert(SpanGroup {
                    role: member.role,
                    span: length - member.deduction,
                    replication: 1,
                });
        }
        groups.into_values().collect()
    }

    /// Corner hardware needed, as `(corner kind, quantity)` in kind order.
    ///
    /// The kind follows the number of members meeting at each corner joint.
    #[must_use]
    pub fn corner_requirements(&self) -> Vec<(PartKind, u32)> {
        let mut required: Vec<(PartKind, u32)> = Vec::new();
        for node in self.joints_of(JointKind::Corner) {
            let degree = self.graph.neighbors_undirected(node).count();
            let Some(kind) = PartKind::corner_for_degree(degree) else {
                tracing::warn!(degree, "no corner kind joins this many members");
                continue;
            };
            match required.iter_mut().find(|(existing, _)| *existing == kind) {
                Some((_, quantity)) => *quantity += 1,
                None => required.push((kind, 1)),
            }
        }
        required
    }

    /// Number of base plates needed.
    #[must_use]
    pub fn base_count(&self) -> u32 {
        u32::try_from(self.joints_of(JointKind::Base).count()).unwrap_or(u32::MAX)
    }

    /// Add a joint holding `kind` hardware at `position`.
    fn add_joint(&mut self, position: Point3<f64>, kind: JointKind) -> NodeIndex {
        self.graph.add_node(Joint { position, kind })
    }

    /// Connect two joints with a member.
    fn add_member(&mut self, start: NodeIndex, end: NodeIndex, role: MemberRole, deduction: f64) {
        self.graph.add_edge(start, end, Member { role, deduction });
    }

    /// Joints holding `kind` hardware.
    fn joints_of(&self, kind: JointKind) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(move |&node| self.graph[node].kind == kind)
    }
}
