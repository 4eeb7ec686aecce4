//! Per-user library operations

mod get_latest_items;

pub use get_latest_items::{
    GetLatestItemsOperation, GetLatestItemsRequest, LATEST_ITEMS_FIELDS, LATEST_ITEMS_LIMIT,
};
