/*!
 * Tests for error types and exit codes
 */

use potrans::errors::{AppError, CatalogError, GatewayError, ProviderError};

/// Test that each failure class has its own exit code
#[test]
fn test_appError_exitCode_shouldDistinguishFailureClasses() {
    assert_eq!(AppError::InputNotFound("a.po".to_string()).exit_code(), 2);
    assert_eq!(AppError::InvalidSelection("9".to_string()).exit_code(), 3);
    assert_eq!(AppError::NoCatalogFiles(".".to_string()).exit_code(), 4);
    assert_eq!(AppError::OutputExists("a_translated.po".to_string()).exit_code(), 5);
    assert_eq!(AppError::Cancelled.exit_code(), 130);
    assert_eq!(AppError::Config("bad".to_string()).exit_code(), 1);
    assert_eq!(AppError::Unknown("?".to_string()).exit_code(), 1);
}

/// Test conversions into the application error
#[test]
fn test_appError_conversions_shouldPickVariant() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let journal_error = CatalogError::Journal(std::io::Error::other("disk full"));
    let app_error: AppError = journal_error.into();
    assert!(matches!(app_error, AppError::Catalog(_)));
    assert_eq!(app_error.exit_code(), 1);

    let plain: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(plain, AppError::Unknown(ref message) if message == "something odd"));
}

/// Test that provider errors map onto log reasons
#[test]
fn test_gatewayError_fromProviderError_shouldUseLogReasons() {
    let api: GatewayError = ProviderError::ApiError {
        status_code: 500,
        message: "boom".to_string(),
    }
    .into();
    assert_eq!(api.to_string(), "Translation command failed");
    assert!(!api.is_transport());

    let request: GatewayError = ProviderError::RequestFailed("connection refused".to_string()).into();
    assert_eq!(request.to_string(), "Error: API request failed: connection refused");
    assert!(request.is_transport());

    assert!(GatewayError::EmptyInput.is_skip());
    assert!(GatewayError::Skipped.is_skip());
    assert!(!GatewayError::Timeout.is_skip());
}
