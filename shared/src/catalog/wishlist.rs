//! Wishlist Set
//!
//! A set of product IDs with symmetric toggle. Persisting it is up to the
//! caller; the serialized form is a plain JSON string list, the same shape the
//! storefront keeps in browser storage.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Wishlist {
    ids: HashSet<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle membership of `id`, returning the new state (`true` = now in the wishlist)
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs in unspecified order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Wishlist {
    fn from(ids: Vec<String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl From<Wishlist> for Vec<String> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.ids.into_iter().collect()
    }
}

impl FromIterator<String> for Wishlist {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.toggle("prod-001"));
        assert!(wishlist.contains("prod-001"));
        assert_eq!(wishlist.len(), 1);

        assert!(!wishlist.toggle("prod-001"));
        assert!(!wishlist.contains("prod-001"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut wishlist: Wishlist = vec!["prod-002".to_string(), "prod-007".to_string()].into();
        let before = wishlist.clone();

        for id in ["prod-002", "prod-031"] {
            wishlist.toggle(id);
            wishlist.toggle(id);
        }
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_toggle_is_independent_per_id() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle("a");
        wishlist.toggle("b");
        wishlist.toggle("a");
        assert!(!wishlist.contains("a"));
        assert!(wishlist.contains("b"));
    }

    #[test]
    fn test_duplicates_collapse_on_load() {
        let wishlist: Wishlist = serde_json::from_str(r#"["prod-001","prod-001","prod-003"]"#).unwrap();
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_serializes_as_string_list() {
        let mut wishlist = Wishlist::new();
        wishlist.toggle("prod-005");
        let json = serde_json::to_string(&wishlist).unwrap();
        assert_eq!(json, r#"["prod-005"]"#);

        let restored: Wishlist = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, wishlist);
    }
}
