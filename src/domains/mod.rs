pub mod abdm;
pub mod accessibility;
pub mod appointments;
pub mod compliance;
pub mod emergency;
pub mod ingestion;
pub mod insurance;
pub mod notifications;
pub mod security;

// Re-export the service traits for easier access
pub use abdm::AbdmApi;
pub use accessibility::AccessibilityApi;
pub use appointments::AppointmentApi;
pub use compliance::ComplianceApi;
pub use emergency::EmergencyApi;
pub use ingestion::IngestionApi;
pub use insurance::InsuranceApi;
pub use notifications::NotificationApi;
pub use security::SecurityApi;
