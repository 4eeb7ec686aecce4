//! Latest items snapshot

use emby_api::Item;

/// Recently added items, in server response order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestItems {
    items: Vec<Item>,
}

impl LatestItems {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// First item whose `Type` equals `category`
    pub fn first_of_type(&self, category: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.is_type(category))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
