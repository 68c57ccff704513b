//! Result helper extensions for dashboard handlers.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

/// Turn an unexpected failure into a 500 that names the failed step.
pub(crate) trait ResultExt<T> {
    fn or_500(self, step: &'static str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, step: &'static str) -> Result<T, StatusError> {
        self.map_err(|cause| {
            error!(step, %cause, "dashboard request failed");

            StatusError::internal_server_error().brief(step)
        })
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn ok_values_pass_through() {
        let result: Result<u8, String> = Ok(7);

        assert_eq!(result.or_500("count").ok(), Some(7));
    }

    #[test]
    fn errors_become_500_with_the_step() {
        let result: Result<(), String> = Err("template exploded".to_string());

        let status = result.or_500("failed to render dashboard").err();

        assert_eq!(status.as_ref().map(|s| s.code), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(status.map(|s| s.brief), Some("failed to render dashboard".to_string()));
    }
}
