///
/// Synchronous access to the current bearer credential.
///
/// Returning [None] means "not authenticated"; the live channel refuses
/// to connect and dispatch calls fail with
/// [Error::MissingCredential](crate::Error::MissingCredential).
///
#[cfg_attr(test, mockall::automock)]
pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}
