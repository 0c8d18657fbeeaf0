//! # Registry: name-keyed and type-keyed index of resources.
//!
//! Plain data structure, no locking; the [`ResourceManager`](super::ResourceManager)
//! guards it with one `RwLock` so every mutation and iteration-for-mutation
//! goes through the same guard.
//!
//! ## Invariants
//! - Every resource in `by_name` appears in exactly one `by_type` bucket,
//!   and vice versa.
//! - `order` holds registration order; iteration for startup follows it and
//!   shutdown follows its reverse. Replacing a name keeps its original slot.

use std::collections::HashMap;
use std::sync::Arc;

use crate::resource::Resource;

/// Insertion-ordered, doubly-indexed resource collection.
#[derive(Default)]
pub(crate) struct Registry {
    by_name: HashMap<String, Arc<Resource>>,
    by_type: HashMap<String, Vec<Arc<Resource>>>,
    order: Vec<String>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<Resource>> {
        self.by_name.get(name).cloned()
    }

    /// Inserts a resource, returning the displaced one on name collision.
    ///
    /// On replacement the old entry leaves its type bucket (the type may have
    /// changed) and the name keeps its original registration slot.
    pub(crate) fn insert(&mut self, resource: Arc<Resource>) -> Option<Arc<Resource>> {
        let name = resource.name().to_string();

        let displaced = self.by_name.insert(name.clone(), Arc::clone(&resource));
        match &displaced {
            Some(old) => self.remove_from_bucket(old),
            None => self.order.push(name),
        }

        self.by_type
            .entry(resource.resource_type().to_string())
            .or_default()
            .push(resource);

        displaced
    }

    /// Removes a resource from both indices and the order.
    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<Resource>> {
        let resource = self.by_name.remove(name)?;
        self.order.retain(|n| n != name);
        self.remove_from_bucket(&resource);
        Some(resource)
    }

    /// Defensive copy of one type bucket, in insertion order.
    pub(crate) fn by_type(&self, resource_type: &str) -> Vec<Arc<Resource>> {
        self.by_type
            .get(resource_type)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count_by_type(&self, resource_type: &str) -> usize {
        self.by_type.get(resource_type).map_or(0, Vec::len)
    }

    /// All registered type tags.
    pub(crate) fn types(&self) -> Vec<String> {
        self.by_type.keys().cloned().collect()
    }

    /// Defensive copy of the full name map.
    pub(crate) fn all(&self) -> HashMap<String, Arc<Resource>> {
        self.by_name.clone()
    }

    /// Resources in registration order.
    pub(crate) fn in_order(&self) -> Vec<Arc<Resource>> {
        self.order
            .iter()
            .filter_map(|name| self.by_name.get(name).cloned())
            .collect()
    }

    /// Names in registration order.
    pub(crate) fn names_in_order(&self) -> Vec<String> {
        self.order.clone()
    }

    fn remove_from_bucket(&mut self, resource: &Arc<Resource>) {
        let resource_type = resource.resource_type();
        if let Some(bucket) = self.by_type.get_mut(resource_type) {
            bucket.retain(|r| !Arc::ptr_eq(r, resource));
            if bucket.is_empty() {
                self.by_type.remove(resource_type);
            }
        }
    }
}
