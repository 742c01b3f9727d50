//! Error handling integration tests
//!
//! Verify that errors map onto the HTTP contract.

#[cfg(test)]
mod tests {
    use account_checker_rs::{CheckerError, ParseError};
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: CheckerError) -> (u16, Value) {
        let response = error.error_response();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_busy_is_retryable_conflict() {
        let error = CheckerError::Busy;
        assert!(error.is_retryable());

        let (status, body) = body_of(error).await;
        assert_eq!(status, 409);
        assert_eq!(body["error"]["code"], "BATCH_BUSY");
        assert!(body["error"]["message"].as_str().unwrap().contains("try again later"));
    }

    #[actix_web::test]
    async fn test_parse_error_is_bad_request() {
        let (status, body) = body_of(ParseError::NoRecognizableRows.into()).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "PARSE_ERROR");
        assert!(!CheckerError::Parse(ParseError::EmptyInput).is_retryable());
    }

    #[actix_web::test]
    async fn test_storage_error_hides_details() {
        let (status, body) = body_of(CheckerError::file_storage("/var/secret/path")).await;
        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("secret"));
    }

    #[actix_web::test]
    async fn test_not_found() {
        let (status, body) = body_of(CheckerError::not_found("success_x.csv")).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[test]
    fn test_duplicate_record_message_names_line() {
        let error = ParseError::DuplicateRecord {
            line: 7,
            id: "alice".to_string(),
        };
        assert_eq!(error.to_string(), "duplicate account 'alice' on line 7");
    }
}
