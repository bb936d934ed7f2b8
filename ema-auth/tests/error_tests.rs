use ema_auth::{AuthError, INTERNAL_CODE, UNAUTHORIZED_CODE};

#[test]
fn rejections_share_code_and_message() {
    let rejections = [
        AuthError::MissingCredentials,
        AuthError::UserNotFound,
        AuthError::InvalidHash,
    ];
    for err in &rejections {
        assert!(err.is_unauthorized());
        assert_eq!(err.code(), UNAUTHORIZED_CODE);
        assert_eq!(err.public_message(), "Unauthorized access");
    }
}

#[test]
fn storage_errors_are_internal() {
    let err = AuthError::Storage("disk full".into());
    assert!(!err.is_unauthorized());
    assert_eq!(err.code(), INTERNAL_CODE);
    assert!(!err.public_message().contains("disk full"));
    assert!(format!("{err}").contains("disk full"));
}

#[test]
fn sqlite_errors_convert_to_storage() {
    let err: AuthError = rusqlite::Error::InvalidQuery.into();
    assert!(matches!(err, AuthError::Storage(_)));
}
