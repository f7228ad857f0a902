use crate::domain::errors::{AdvisorError, AdvisorResult};
use crate::domain::models::{
    tree_node::{ToolRecommendation, TreeNode, RECOMMENDATION_NODE_ID, START_NODE_ID},
    TreeStats,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::info;

const BUILTIN_TREE: &str = include_str!("../../../data/decision_tree.json");

/// Immutable, validated mapping from node id to node content.
///
/// Every constructor runs [`DecisionTree::validate`], so a value of this type
/// always has a `"start"` root, a terminal `"recommendation"` node and no
/// option pointing at a missing node. Nodes live in a `BTreeMap` so that
/// whole-tree walks are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: BTreeMap<String, TreeNode>,
}

impl DecisionTree {
    /// Builds a tree from a keyed node map.
    ///
    /// Nodes without an `id` take their key. The terminal node is inserted
    /// when the map does not define it.
    ///
    /// # Returns
    /// * `Ok(DecisionTree)` - A validated tree
    /// * `Err(AdvisorError::NodeIdMismatch)` - If a node declares an id other than its key
    /// * `Err(AdvisorError::*)` - Any failure reported by [`DecisionTree::validate`]
    pub fn from_nodes(nodes: BTreeMap<String, TreeNode>) -> AdvisorResult<Self> {
        let mut normalized = BTreeMap::new();
        for (key, mut node) in nodes {
            if node.id.is_empty() {
                node.id = key.clone();
            } else if node.id != key {
                return Err(AdvisorError::NodeIdMismatch { key, id: node.id });
            }
            normalized.insert(key, node);
        }
        normalized
            .entry(RECOMMENDATION_NODE_ID.to_string())
            .or_insert_with(TreeNode::terminal);

        let tree = Self { nodes: normalized };
        tree.validate()?;
        Ok(tree)
    }

    pub fn from_json_str(json: &str) -> AdvisorResult<Self> {
        let nodes: BTreeMap<String, TreeNode> = serde_json::from_str(json)?;
        Self::from_nodes(nodes)
    }

    pub fn from_path(path: &Path) -> AdvisorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let tree = Self::from_json_str(&json)?;
        info!(path = %path.display(), nodes = tree.len(), "Loaded decision tree");
        Ok(tree)
    }

    /// The journalism tree shipped with the crate.
    pub fn builtin() -> AdvisorResult<Self> {
        Self::from_json_str(BUILTIN_TREE)
    }

    /// Looks up a node by id.
    ///
    /// # Returns
    /// * `Ok(&TreeNode)` - The node, including the terminal node
    /// * `Err(AdvisorError::NotFound)` - If no node has this id
    pub fn get_node(&self, id: &str) -> AdvisorResult<&TreeNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| AdvisorError::NotFound(id.to_string()))
    }

    pub fn root(&self) -> AdvisorResult<&TreeNode> {
        self.get_node(START_NODE_ID)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    /// Every recommendation in the tree, in node-id then option order.
    pub fn all_tools(&self) -> Vec<&ToolRecommendation> {
        self.nodes
            .values()
            .flat_map(|node| node.options.iter())
            .flat_map(|option| option.tools().iter())
            .collect()
    }

    /// Checks the structural rules every loaded tree must satisfy.
    ///
    /// Acyclicity is not required here: the same sub-tree may be reached from
    /// several branches. Every `next` must resolve, though, so no session can
    /// dead-end on a missing node.
    pub fn validate(&self) -> AdvisorResult<()> {
        if !self.nodes.contains_key(START_NODE_ID) {
            return Err(AdvisorError::MissingRoot(START_NODE_ID.to_string()));
        }

        for node in self.nodes.values() {
            if node.is_terminal() {
                if !node.options.is_empty() {
                    return Err(AdvisorError::TerminalHasOptions(node.id.clone()));
                }
                continue;
            }

            if node.options.is_empty() {
                return Err(AdvisorError::DeadEnd(node.id.clone()));
            }

            let mut seen = HashSet::new();
            for option in &node.options {
                if !seen.insert(option.text.as_str()) {
                    return Err(AdvisorError::DuplicateOption {
                        node_id: node.id.clone(),
                        option_text: option.text.clone(),
                    });
                }

                if !self.nodes.contains_key(&option.next) {
                    return Err(AdvisorError::DanglingReference {
                        node_id: node.id.clone(),
                        option_text: option.text.clone(),
                        next: option.next.clone(),
                    });
                }

                if option.tools.is_some() != option.leads_to_recommendation() {
                    return Err(AdvisorError::ToolsMismatch {
                        node_id: node.id.clone(),
                        option_text: option.text.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Counts nodes, options and recommendations and measures branch depth.
    ///
    /// # Returns
    /// * `Ok(TreeStats)` - Counts over the whole tree, depths over nodes reachable from the root
    /// * `Err(AdvisorError::CycleDetected)` - If a path from the root revisits a node
    pub fn stats(&self) -> AdvisorResult<TreeStats> {
        let mut memo = HashMap::new();
        let mut on_path = HashSet::new();
        let (min_depth, max_depth) = self.depth_range(START_NODE_ID, &mut on_path, &mut memo)?;

        let option_count = self.nodes.values().map(|node| node.options.len()).sum();

        Ok(TreeStats {
            node_count: self.nodes.len(),
            option_count,
            recommendation_count: self.all_tools().len(),
            min_depth,
            max_depth,
        })
    }

    fn depth_range(
        &self,
        id: &str,
        on_path: &mut HashSet<String>,
        memo: &mut HashMap<String, (usize, usize)>,
    ) -> AdvisorResult<(usize, usize)> {
        if id == RECOMMENDATION_NODE_ID {
            return Ok((0, 0));
        }
        if let Some(range) = memo.get(id) {
            return Ok(*range);
        }
        if !on_path.insert(id.to_string()) {
            return Err(AdvisorError::CycleDetected(id.to_string()));
        }

        let node = self.get_node(id)?;
        let mut range: Option<(usize, usize)> = None;
        for option in &node.options {
            let (low, high) = self.depth_range(&option.next, on_path, memo)?;
            range = Some(match range {
                None => (low + 1, high + 1),
                Some((min, max)) => (min.min(low + 1), max.max(high + 1)),
            });
        }
        on_path.remove(id);

        let range = range.ok_or_else(|| AdvisorError::DeadEnd(id.to_string()))?;
        memo.insert(id.to_string(), range);
        Ok(range)
    }
}
