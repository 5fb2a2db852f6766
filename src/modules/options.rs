//! `OPTIONS` responses for resource routes.
//!
//! Answers with the allowed methods and a short description of the
//! resource, whoever the caller is.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const COLLECTION_METHODS: &str = "GET, POST, HEAD, OPTIONS";
pub const ITEM_METHODS: &str = "GET, PUT, PATCH, DELETE, HEAD, OPTIONS";

pub fn describe(name: &'static str, allow: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::ALLOW, allow)],
        Json(json!({
            "name": name,
            "renders": ["application/json"],
            "parses": ["application/json"],
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_sets_allow_header() {
        let response = describe("Course List", COLLECTION_METHODS);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            "GET, POST, HEAD, OPTIONS"
        );
    }
}
