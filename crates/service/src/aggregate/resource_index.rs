use std::collections::HashMap;

use models::Resource;

use crate::errors::ServiceError;

/// Primary index: resource id -> aggregate.
#[derive(Clone, Debug, Default)]
pub struct ResourceIndex {
    by_id: HashMap<String, Resource>,
}

impl ResourceIndex {
    pub fn len(&self) -> usize { self.by_id.len() }
    pub fn is_empty(&self) -> bool { self.by_id.is_empty() }
    pub fn contains(&self, id: &str) -> bool { self.by_id.contains_key(id) }
    pub fn get(&self, id: &str) -> Option<&Resource> { self.by_id.get(id) }

    /// Crate-private so embedded rate refs cannot be edited around the flat index.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Resource> { self.by_id.get_mut(id) }

    pub fn insert(&mut self, resource: Resource) -> Result<(), ServiceError> {
        if self.by_id.contains_key(&resource.id) {
            return Err(ServiceError::Duplicate(format!("resource <{}> exists already", resource.id)));
        }
        self.by_id.insert(resource.id.clone(), resource);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Resource> { self.by_id.remove(id) }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> { self.by_id.values() }

    /// All aggregates in listing order: by name, ties broken by id.
    pub fn sorted(&self) -> Vec<&Resource> {
        let mut all: Vec<&Resource> = self.by_id.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_resource;

    #[test]
    fn insert_rejects_existing_id() {
        let mut index = ResourceIndex::default();
        let res = sample_resource("Desk", "c1");
        index.insert(res.clone()).unwrap();
        assert!(matches!(index.insert(res), Err(ServiceError::Duplicate(_))));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn sorted_orders_by_name_then_id() {
        let mut index = ResourceIndex::default();
        let mut a = sample_resource("Same", "c1");
        a.id = "b".into();
        let mut b = sample_resource("Same", "c1");
        b.id = "a".into();
        let c = sample_resource("Alpha", "c1");
        for r in [a, b, c.clone()] {
            index.insert(r).unwrap();
        }
        let ids: Vec<&str> = index.sorted().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![c.id.as_str(), "a", "b"]);
    }
}
