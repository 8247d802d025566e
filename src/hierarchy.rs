//! Goods hierarchy transform: untrusted treemap payload to a weighted tree.

use crate::models::{RawGoodsNode, TreemapPayload};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One node of the aggregated goods tree.
///
/// `value` is the node's weight: the declared value on leaves, the sum of
/// descendant leaf values on internal nodes. Children are sorted descending
/// by weight, which fixes the packing order (and therefore tie-breaks) of
/// the proportional-area layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GoodsNode {
    pub name: String,
    pub title_prefix: Option<String>,
    pub value: f64,
    pub children: Vec<GoodsNode>,
}

impl GoodsNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn from_raw(raw: &RawGoodsNode) -> GoodsNode {
        if raw.children.is_empty() {
            return GoodsNode {
                name: raw.name.clone(),
                title_prefix: raw.title_prefix.clone(),
                value: raw.value.unwrap_or(0.0),
                children: Vec::new(),
            };
        }
        let mut children: Vec<GoodsNode> = raw.children.iter().map(Self::from_raw).collect();
        children.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        // Internal weights are recomputed, never trusted from the payload.
        let value: f64 = children.iter().map(|c| c.value).sum();
        GoodsNode {
            name: raw.name.clone(),
            title_prefix: raw.title_prefix.clone(),
            value,
            children,
        }
    }
}

/// Aggregated goods tree plus the per-category totals used for
/// share-of-category percentages.
#[derive(Debug, Clone, PartialEq)]
pub struct GoodsTree {
    pub root: GoodsNode,
    /// One entry per depth-1 node ("Exports", "Imports"), computed once per
    /// transform.
    pub category_totals: BTreeMap<String, f64>,
}

impl GoodsTree {
    /// Percentage share of `value` within the named top-level category,
    /// in `0..=100`. Unknown categories and empty totals yield `0`.
    pub fn category_share(&self, category: &str, value: f64) -> f64 {
        match self.category_totals.get(category) {
            Some(total) if *total > 0.0 => value / total * 100.0,
            _ => 0.0,
        }
    }
}

/// Build the weighted hierarchy from a goods payload.
///
/// Returns `None` when the payload has no treemap root or the root has no
/// children — soft "nothing to draw", mirroring the evolution transform.
pub fn to_hierarchy(payload: &TreemapPayload) -> Option<GoodsTree> {
    let raw = payload.treemap.as_ref()?;
    if raw.children.is_empty() {
        return None;
    }
    let root = GoodsNode::from_raw(raw);
    let category_totals = root
        .children
        .iter()
        .map(|c| (c.name.clone(), c.value))
        .collect();
    Some(GoodsTree {
        root,
        category_totals,
    })
}
