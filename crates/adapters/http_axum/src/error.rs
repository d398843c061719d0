//! Error to invocation response mapping.

use axum::http::StatusCode;

use devicekv_domain::error::DeviceKvError;

use crate::invocation::ProxyResponse;

/// Maps [`DeviceKvError`] to a [`ProxyResponse`] with the appropriate status code.
pub struct ApiError(DeviceKvError);

impl From<DeviceKvError> for ApiError {
    fn from(err: DeviceKvError) -> Self {
        Self(err)
    }
}

impl From<ApiError> for ProxyResponse {
    fn from(err: ApiError) -> Self {
        match err.0 {
            DeviceKvError::Validation(err) => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            DeviceKvError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                Self::status_text(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devicekv_domain::device::Field;
    use devicekv_domain::error::ValidationError;

    #[test]
    fn should_map_validation_error_to_bad_request_with_field_list() {
        let err = DeviceKvError::from(ValidationError::EmptyFields(vec![Field::Id, Field::Note]));
        let response = ProxyResponse::from(ApiError::from(err));
        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            "Empty Field is not valid,Check the following: ID, Note, "
        );
    }

    #[test]
    fn should_hide_storage_error_details() {
        let err = DeviceKvError::Storage(Box::new(std::io::Error::other("disk on fire")));
        let response = ProxyResponse::from(ApiError::from(err));
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Internal Server Error");
    }
}
