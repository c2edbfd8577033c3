use super::models::*;
use super::EmergencyApi;
use async_trait::async_trait;
use serde_json::json;
use shared::{Acknowledgement, OperationContext, Result, ServiceClient};
use tracing::warn;

pub struct LiveEmergencyService {
    client: ServiceClient,
}

impl LiveEmergencyService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmergencyApi for LiveEmergencyService {
    async fn get_emergency_contacts(&self) -> Result<Vec<EmergencyContact>> {
        self.client
            .get("/emergency/contacts")
            .await
            .or_fail("Failed to fetch emergency contacts")
    }

    async fn add_emergency_contact(&self, contact: NewEmergencyContact) -> Result<EmergencyContact> {
        self.client
            .post("/emergency/contacts", &contact)
            .await
            .or_fail("Failed to add emergency contact")
    }

    async fn remove_emergency_contact(&self, contact_id: &str) -> Result<Acknowledgement> {
        let endpoint = ServiceClient::endpoint(&["emergency", "contacts", contact_id])
            .or_fail("Failed to remove emergency contact")?;
        self.client
            .delete(&endpoint)
            .await
            .or_fail("Failed to remove emergency contact")
    }

    async fn get_emergency_profile(&self) -> Result<EmergencyProfile> {
        self.client
            .get("/emergency/profile")
            .await
            .or_fail("Failed to fetch emergency profile")
    }

    async fn update_emergency_profile(&self, update: EmergencyProfileUpdate) -> Result<EmergencyProfile> {
        self.client
            .put("/emergency/profile", &update)
            .await
            .or_fail("Failed to update emergency profile")
    }

    async fn trigger_sos(&self, request: SosRequest) -> Result<SosAlert> {
        warn!(has_location = request.location.is_some(), "🚨 SOS triggered");
        self.client
            .post("/emergency/sos", &request)
            .await
            .or_fail("Failed to trigger SOS")
    }

    async fn cancel_sos(&self, alert_id: &str) -> Result<SosAlert> {
        let endpoint = ServiceClient::endpoint(&["emergency", "sos", alert_id, "cancel"])
            .or_fail("Failed to cancel SOS")?;
        self.client
            .post(&endpoint, &json!({}))
            .await
            .or_fail("Failed to cancel SOS")
    }

    async fn find_nearby_facilities(&self, query: FacilityQuery) -> Result<Vec<NearbyFacility>> {
        self.client
            .get_query("/emergency/facilities", &query)
            .await
            .or_fail("Failed to fetch nearby facilities")
    }
}
