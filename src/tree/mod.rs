//
//  marketplace-sdk
//  tree/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Tree Denormalization
//!
//! Several endpoints return hierarchies as flat lists of records, each with a
//! key and an optional parent key (divisions are the main example). Some
//! records may already arrive nested under a `children` list. [`denormalize`]
//! turns any mix of the two into a forest of owned trees.
//!
//! ## Algorithm
//!
//! 1. Flatten the input depth-first, pulling pre-nested children out.
//! 2. Index every record by key (first occurrence wins).
//! 3. One pass in input order: a record whose parent key resolves to another
//!    record becomes that record's child; anything else is a root.
//! 4. Assemble from the roots down and return the roots in input order.
//!
//! The lookup is complete before step 3 starts, so a parent listed after its
//! children still resolves. Children keep the order they were met in.
//!
//! ## Malformed input
//!
//! Cycles and duplicate keys are the caller's problem and are not repaired.
//! Records trapped in a cycle are not reachable from any root and are left
//! out of the result; a record naming itself as parent stays a root; children
//! of a duplicated key attach to its first occurrence.
//!
//! ## Example
//!
//! ```rust
//! use marketplace_sdk::services::divisions::Division;
//! use marketplace_sdk::tree::denormalize;
//!
//! let forest = denormalize(vec![
//!     Division::new("FR", None),
//!     Division::new("FR-69", Some("FR")),
//!     Division::new("FR-01", Some("FR")),
//! ]);
//!
//! assert_eq!(forest.len(), 1);
//! let codes: Vec<_> = forest[0].children.iter().map(|d| d.code.as_str()).collect();
//! assert_eq!(codes, ["FR-69", "FR-01"]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A record that can take part in a tree.
pub trait TreeNode: Sized {
    type Key: Eq + Hash + Clone;

    /// Unique key of this record.
    fn key(&self) -> &Self::Key;

    /// Key of the parent record, if it names one.
    fn parent_key(&self) -> Option<&Self::Key>;

    /// Removes and returns any children the record arrived with.
    fn take_children(&mut self) -> Vec<Self>;

    /// Appends a child. Only used while assembling.
    fn push_child(&mut self, child: Self);
}

/// Builds a forest out of flat or partly nested records.
pub fn denormalize<N, I>(records: I) -> Vec<N>
where
    N: TreeNode,
    I: IntoIterator<Item = N>,
{
    let mut flat = Vec::new();
    for record in records {
        flatten_into(record, &mut flat);
    }

    let mut index: HashMap<N::Key, usize> = HashMap::with_capacity(flat.len());
    for (position, node) in flat.iter().enumerate() {
        index.entry(node.key().clone()).or_insert(position);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots = Vec::new();
    for (position, node) in flat.iter().enumerate() {
        match node.parent_key().and_then(|parent| index.get(parent)) {
            Some(&parent) if parent != position => children[parent].push(position),
            _ => roots.push(position),
        }
    }

    let mut slots: Vec<Option<N>> = flat.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|root| assemble(root, &mut slots, &children))
        .collect()
}

/// Runs [`denormalize`] independently for each group.
///
/// Used for per-product data where every product id carries its own list of
/// records.
pub fn denormalize_grouped<K, N, I, G>(groups: G) -> BTreeMap<K, Vec<N>>
where
    K: Ord,
    N: TreeNode,
    I: IntoIterator<Item = N>,
    G: IntoIterator<Item = (K, I)>,
{
    groups
        .into_iter()
        .map(|(key, records)| (key, denormalize(records)))
        .collect()
}

fn flatten_into<N: TreeNode>(mut record: N, out: &mut Vec<N>) {
    let nested = record.take_children();
    out.push(record);
    for child in nested {
        flatten_into(child, out);
    }
}

fn assemble<N: TreeNode>(
    position: usize,
    slots: &mut [Option<N>],
    children: &[Vec<usize>],
) -> Option<N> {
    let mut node = slots[position].take()?;
    for &child in &children[position] {
        if let Some(child) = assemble(child, slots, children) {
            node.push_child(child);
        }
    }
    Some(node)
}
