// Domain layer - Pure business logic
// No dependencies on infrastructure or application layers

pub mod account;
pub mod check_in;
pub mod notification;
pub mod redemption;
pub mod report;
pub mod reporting;
pub mod shared;

// Re-exports for convenience
pub use account::Credential;
pub use shared::DomainError;
