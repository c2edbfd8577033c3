//! Emergency contacts, medical ID and SOS

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveEmergencyService;
pub use mock::MockEmergencyService;
pub use models::*;

use async_trait::async_trait;
use shared::{Acknowledgement, Result};

#[async_trait]
pub trait EmergencyApi: Send + Sync {
    async fn get_emergency_contacts(&self) -> Result<Vec<EmergencyContact>>;

    async fn add_emergency_contact(&self, contact: NewEmergencyContact) -> Result<EmergencyContact>;

    async fn remove_emergency_contact(&self, contact_id: &str) -> Result<Acknowledgement>;

    async fn get_emergency_profile(&self) -> Result<EmergencyProfile>;

    async fn update_emergency_profile(&self, update: EmergencyProfileUpdate) -> Result<EmergencyProfile>;

    async fn trigger_sos(&self, request: SosRequest) -> Result<SosAlert>;

    async fn cancel_sos(&self, alert_id: &str) -> Result<SosAlert>;

    async fn find_nearby_facilities(&self, query: FacilityQuery) -> Result<Vec<NearbyFacility>>;
}
