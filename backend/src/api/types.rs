//! REST API response types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{Post, PostWithAuthor, User};
use crate::transform::pipeline::{TransformOptions, TransformReport};

/// Overall outcome of a transform request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Every record transformed cleanly.
    Ready,
    /// Transformed, but the mean is not a number or records violate the schema.
    Warning,
    Error,
}

/// Response to `/api/records`, `/api/transform` and `/api/upload`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub request_id: String,
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub report: TransformReport,
}

impl From<TransformReport> for TransformResponse {
    fn from(report: TransformReport) -> Self {
        let degraded = report.mean.is_nan()
            || !report.validation_errors.is_empty()
            || report.transformed.iter().any(|r| !r.birth_date.is_valid());

        Self {
            request_id: new_request_id(),
            status: if degraded {
                ResponseStatus::Warning
            } else {
                ResponseStatus::Ready
            },
            report,
        }
    }
}

/// Query string accepted by the transform endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformQuery {
    pub strict: Option<bool>,
    #[serde(default)]
    pub validate: bool,
}

impl TransformQuery {
    /// Merge with the server default; an explicit `strict` wins.
    pub fn options(&self, default_strict: bool) -> TransformOptions {
        TransformOptions {
            strict: self.strict.unwrap_or(default_strict),
            validate: self.validate,
        }
    }
}

/// Response to `/api/posts`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsResponse {
    pub request_id: String,
    pub count: usize,
    pub posts: Vec<Post>,
}

impl From<Vec<Post>> for PostsResponse {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            request_id: new_request_id(),
            count: posts.len(),
            posts,
        }
    }
}

/// Response to `/api/posts/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub request_id: String,
    pub post: Post,
    pub author: User,
}

impl From<PostWithAuthor> for PostDetailResponse {
    fn from(detail: PostWithAuthor) -> Self {
        Self {
            request_id: new_request_id(),
            post: detail.post,
            author: detail.author,
        }
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "requestId": new_request_id(),
        "status": ResponseStatus::Error,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_records;
    use crate::transform::pipeline::transform_records;

    #[test]
    fn test_ready_response_flattens_report() {
        let report = transform_records(sample_records(), &TransformOptions::default()).unwrap();
        let json = serde_json::to_value(TransformResponse::from(report)).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["count"], 10);
        assert_eq!(json["meanRounded"], "546.20");
        assert_eq!(json["transformed"][6]["fullName"], "Ham");
        assert!(Uuid::parse_str(json["requestId"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_invalid_date_gives_warning() {
        let mut records = sample_records();
        records[3].birth_date = "09.01".into();
        let report = transform_records(records, &TransformOptions::default()).unwrap();

        assert_eq!(TransformResponse::from(report).status, ResponseStatus::Warning);
    }

    #[test]
    fn test_query_options() {
        let query = TransformQuery {
            strict: None,
            validate: true,
        };
        assert!(query.options(true).strict);
        assert!(query.options(true).validate);

        let query = TransformQuery {
            strict: Some(false),
            validate: false,
        };
        assert!(!query.options(true).strict);
    }

    #[test]
    fn test_error_response() {
        let body = error_response("boom");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "boom");
    }
}
