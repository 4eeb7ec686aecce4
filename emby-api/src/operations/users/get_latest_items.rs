//! GetLatestItems operation

use crate::models::Item;
use crate::operation::{EmbyOperation, Method, ResponseBody};
use crate::{ApiError, Result};

/// Number of items requested per poll
pub const LATEST_ITEMS_LIMIT: u32 = 10;

/// Extra fields requested alongside the default item fields
pub const LATEST_ITEMS_FIELDS: &str =
    "PrimaryImageAspectRatio,DateCreated,ParentId,SeriesId,ParentIndexNumber";

/// List the most recently added items in a user's libraries
pub struct GetLatestItemsOperation;

/// Request for GetLatestItems operation
#[derive(Debug, Clone)]
pub struct GetLatestItemsRequest {
    pub user_id: String,
    pub limit: u32,
}

impl GetLatestItemsRequest {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            limit: LATEST_ITEMS_LIMIT,
        }
    }
}

impl EmbyOperation for GetLatestItemsOperation {
    type Request = GetLatestItemsRequest;
    type Response = Vec<Item>;

    const METHOD: Method = Method::Get;
    const NAME: &'static str = "GetLatestItems";

    fn path(request: &Self::Request) -> String {
        format!(
            "/emby/Users/{}/Items/Latest",
            urlencoding::encode(&request.user_id)
        )
    }

    fn query(request: &Self::Request) -> Vec<(&'static str, String)> {
        vec![
            ("Limit", request.limit.to_string()),
            ("Fields", LATEST_ITEMS_FIELDS.to_string()),
        ]
    }

    fn validate(request: &Self::Request) -> Result<()> {
        if request.user_id.is_empty() {
            return Err(ApiError::InvalidParameter("user_id must not be empty".to_string()));
        }
        Ok(())
    }

    fn parse_response(_request: &Self::Request, body: ResponseBody) -> Result<Self::Response> {
        match body {
            ResponseBody::Json(value) if value.is_array() => Ok(serde_json::from_value(value)?),
            ResponseBody::Json(_) => Err(ApiError::ParseError("Expected an array of items".to_string())),
            ResponseBody::Status(status) => Err(ApiError::HttpStatus(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_and_query() {
        let req = GetLatestItemsRequest::new("user-1");
        assert_eq!(GetLatestItemsOperation::path(&req), "/emby/Users/user-1/Items/Latest");

        let query = GetLatestItemsOperation::query(&req);
        assert_eq!(query[0], ("Limit", "10".to_string()));
        assert_eq!(query[1].0, "Fields");
        assert!(query[1].1.contains("ParentIndexNumber"));
    }

    #[test]
    fn test_parse_preserves_order() {
        let req = GetLatestItemsRequest::new("u");
        let body = ResponseBody::Json(json!([
            {"Id": "1", "Name": "First", "Type": "Movie"},
            {"Id": "2", "Name": "Second", "Type": "Episode"},
            {"Id": "3", "Name": "Third", "Type": "Movie"}
        ]));

        let items = GetLatestItemsOperation::parse_response(&req, body).unwrap();
        let names: Vec<_> = items.iter().filter_map(|i| i.name.as_deref()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_empty_user_id_is_invalid() {
        let req = GetLatestItemsRequest::new("");
        assert!(GetLatestItemsOperation::validate(&req).is_err());
    }
}
