//! Streaming parent resolution.
//!
//! Consumes nodes sorted by `(forest, left)` and keeps only the open
//! ancestor chain on a stack. A node at depth `d` closes every open entry
//! with depth `>= d`; whatever remains on top is its parent.
//! O(n) total, no lookahead, no backtracking.
//!
//! Depths and bounds are cross-checked on the way: a closed entry that still
//! encloses the node, a parent that does not enclose it, or a skipped level
//! is an anomaly. Tolerant mode keeps the top-of-stack parent and records
//! it; strict mode fails the pass.
//!
//! The resolver is pass-scoped: build one per batch and drop it afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use nestree_core::config::DepthMode;
use nestree_core::error::{Error, Result};
use nestree_core::id::{ForestId, NodeId};
use nestree_core::node::NodeRecord;

/// Inconsistency between depths and bounds observed while resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveAnomaly {
    /// The node sits more than one level below its resolved parent; the
    /// levels in between are missing from the batch (or the depths are stale).
    DepthGap {
        node: NodeId,
        depth: u32,
        parent: NodeId,
        parent_depth: u32,
    },
    /// The node's depth closed an entry whose interval still encloses it.
    DepthDrop {
        node: NodeId,
        depth: u32,
        enclosing: NodeId,
        enclosing_depth: u32,
    },
    /// The resolved parent's interval does not strictly contain the node.
    NotContained { node: NodeId, parent: NodeId },
}

impl ResolveAnomaly {
    /// The node the anomaly was observed on.
    pub fn node(&self) -> NodeId {
        match *self {
            ResolveAnomaly::DepthGap { node, .. }
            | ResolveAnomaly::DepthDrop { node, .. }
            | ResolveAnomaly::NotContained { node, .. } => node,
        }
    }
}

impl fmt::Display for ResolveAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveAnomaly::DepthGap {
                depth,
                parent,
                parent_depth,
                ..
            } => write!(
                f,
                "depth {} directly below {} at depth {}",
                depth, parent, parent_depth
            ),
            ResolveAnomaly::DepthDrop {
                depth,
                enclosing,
                enclosing_depth,
                ..
            } => write!(
                f,
                "depth {} closes {} at depth {} whose bounds still enclose it",
                depth, enclosing, enclosing_depth
            ),
            ResolveAnomaly::NotContained { parent, .. } => {
                write!(f, "bounds are not inside resolved parent {}", parent)
            }
        }
    }
}

/// Parents for a batch, aligned with the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub parents: Vec<Option<NodeId>>,
    pub anomalies: Vec<ResolveAnomaly>,
}

/// One entry of the open chain.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    id: NodeId,
    depth: u32,
    left: i64,
    right: i64,
}

impl OpenNode {
    fn encloses(&self, node: &NodeRecord) -> bool {
        self.left < node.left && node.right < self.right
    }
}

#[derive(Debug)]
pub struct ParentResolver {
    stack: Vec<OpenNode>,
    /// Forest of the open chain; `None` until the first node arrives.
    forest: Option<Option<ForestId>>,
    mode: DepthMode,
    anomalies: Vec<ResolveAnomaly>,
}

impl ParentResolver {
    pub fn new(mode: DepthMode) -> Self {
        Self {
            stack: Vec::new(),
            forest: None,
            mode,
            anomalies: Vec::new(),
        }
    }

    /// Resolve the parent of the next node in `(forest, left)` order.
    pub fn push(&mut self, node: &NodeRecord) -> Result<Option<NodeId>> {
        if self.forest != Some(node.forest) {
            // New forest: the previous chain cannot contain this node.
            self.stack.clear();
            self.forest = Some(node.forest);
        }

        let mut enclosing_closed = None;
        while let Some(top) = self.stack.last().copied() {
            if top.depth < node.depth {
                break;
            }
            if enclosing_closed.is_none() && top.encloses(node) {
                enclosing_closed = Some(top);
            }
            self.stack.pop();
        }

        if let Some(closed) = enclosing_closed {
            self.flag(ResolveAnomaly::DepthDrop {
                node: node.id,
                depth: node.depth,
                enclosing: closed.id,
                enclosing_depth: closed.depth,
            })?;
        }

        let parent = self.stack.last().copied();
        if let Some(p) = parent {
            if !p.encloses(node) {
                self.flag(ResolveAnomaly::NotContained {
                    node: node.id,
                    parent: p.id,
                })?;
            }
            if node.depth > p.depth + 1 {
                self.flag(ResolveAnomaly::DepthGap {
                    node: node.id,
                    depth: node.depth,
                    parent: p.id,
                    parent_depth: p.depth,
                })?;
            }
        }

        self.stack.push(OpenNode {
            id: node.id,
            depth: node.depth,
            left: node.left,
            right: node.right,
        });
        Ok(parent.map(|p| p.id))
    }

    fn flag(&mut self, anomaly: ResolveAnomaly) -> Result<()> {
        if self.mode == DepthMode::Strict {
            return Err(Error::integrity(anomaly.node(), anomaly.to_string()));
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            node = %anomaly.node(),
            %anomaly,
            "inconsistent nesting; keeping nearest open ancestor"
        );

        self.anomalies.push(anomaly);
        Ok(())
    }

    pub fn anomalies(&self) -> &[ResolveAnomaly] {
        &self.anomalies
    }

    /// Current open chain, outermost first.
    pub fn open_chain(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.stack.iter().map(|open| open.id)
    }

    /// Forget all pass state.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.forest = None;
        self.anomalies.clear();
    }

    /// Resolve a whole sorted batch, consuming the resolver.
    pub fn resolve_all<'a>(
        mut self,
        nodes: impl IntoIterator<Item = &'a NodeRecord>,
    ) -> Result<Resolution> {
        let parents = nodes
            .into_iter()
            .map(|n| self.push(n))
            .collect::<Result<Vec<_>>>()?;
        Ok(Resolution {
            parents,
            anomalies: self.anomalies,
        })
    }
}
