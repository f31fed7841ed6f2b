//! Repository errors as gRPC statuses

use tonic::{Code, Status};

use crate::repository::{RepositoryError, RepositoryErrorKind};

/// The status code reported for each repository error kind
pub fn status_code(kind: RepositoryErrorKind) -> Code {
    match kind {
        RepositoryErrorKind::NotFound => Code::NotFound,
        RepositoryErrorKind::ValidationFailed => Code::InvalidArgument,
        RepositoryErrorKind::ConstraintViolation => Code::FailedPrecondition,
        RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => Code::Unavailable,
        RepositoryErrorKind::DatabaseError => Code::Internal,
    }
}

impl From<RepositoryError> for Status {
    fn from(err: RepositoryError) -> Self {
        let code = status_code(err.kind);
        // Raw driver messages stay in the logs
        let message = match err.kind {
            RepositoryErrorKind::DatabaseError => format!("{} failed", err.operation),
            _ => err.to_string(),
        };
        Status::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(RepositoryErrorKind::NotFound), Code::NotFound);
        assert_eq!(
            status_code(RepositoryErrorKind::ValidationFailed),
            Code::InvalidArgument
        );
        assert_eq!(
            status_code(RepositoryErrorKind::ConstraintViolation),
            Code::FailedPrecondition
        );
        assert_eq!(
            status_code(RepositoryErrorKind::ConnectionFailed),
            Code::Unavailable
        );
        assert_eq!(status_code(RepositoryErrorKind::Timeout), Code::Unavailable);
        assert_eq!(status_code(RepositoryErrorKind::DatabaseError), Code::Internal);
    }

    #[test]
    fn test_not_found_keeps_entity_context() {
        let status = Status::from(RepositoryError::not_found("Post", "post_1"));
        assert_eq!(status.code(), Code::NotFound);
        assert!(status.message().contains("[Post: post_1]"));
    }

    #[test]
    fn test_validation_message_is_forwarded() {
        let status = Status::from(RepositoryError::no_fields_provided("Tag", "tag_1"));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("no fields provided for update"));
    }

    #[test]
    fn test_database_error_message_is_generic() {
        let status = Status::from(RepositoryError::database_error(
            RepositoryOperation::List,
            "relation \"posts\" does not exist",
        ));
        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), "list failed");
    }
}
