use super::models::*;
use super::EmergencyApi;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::utils::{generate_mock_id, is_valid_phone, random_between};
use shared::{Acknowledgement, AppError, GeoPoint, MockLatency, OperationContext, Result};
use tracing::{info, warn};

struct EmergencyState {
    contacts: Vec<EmergencyContact>,
    profile: EmergencyProfileUpdate,
    alerts: Vec<SosAlert>,
}

pub struct MockEmergencyService {
    latency: MockLatency,
    state: Mutex<EmergencyState>,
}

impl MockEmergencyService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            state: Mutex::new(EmergencyState {
                contacts: vec![
                    EmergencyContact {
                        id: "contact-001".to_string(),
                        name: "Sunita Sharma".to_string(),
                        relationship: "Mother".to_string(),
                        phone: "9812345670".to_string(),
                        is_primary: true,
                    },
                    EmergencyContact {
                        id: "contact-002".to_string(),
                        name: "Arjun Mehta".to_string(),
                        relationship: "Friend".to_string(),
                        phone: "9898989898".to_string(),
                        is_primary: false,
                    },
                ],
                profile: EmergencyProfileUpdate {
                    blood_group: Some(BloodGroup::BPositive),
                    allergies: vec!["Penicillin".to_string()],
                    conditions: vec!["Asthma".to_string()],
                    medications: vec!["Salbutamol inhaler".to_string()],
                    organ_donor: true,
                    notes: None,
                },
                alerts: Vec::new(),
            }),
        }
    }
}

fn facilities() -> Vec<(&'static str, &'static str, FacilityKind, &'static str, &'static str, GeoPoint, bool)> {
    vec![
        ("fac-001", "AIIMS Trauma Centre", FacilityKind::Hospital, "Ring Road, New Delhi", "01126594405", GeoPoint::new(28.5672, 77.2100), true),
        ("fac-002", "Safdarjung Hospital", FacilityKind::Hospital, "Ansari Nagar, New Delhi", "01126707444", GeoPoint::new(28.5680, 77.2055), true),
        ("fac-003", "Apollo Pharmacy Green Park", FacilityKind::Pharmacy, "Green Park Market, New Delhi", "01141755555", GeoPoint::new(28.5598, 77.2066), false),
        ("fac-004", "Red Cross Blood Bank", FacilityKind::BloodBank, "Red Cross Road, New Delhi", "01123716441", GeoPoint::new(28.6210, 77.2117), false),
        ("fac-005", "CATS Ambulance 102", FacilityKind::Ambulance, "Dispatch, New Delhi", "102", GeoPoint::new(28.6139, 77.2090), true),
        ("fac-006", "Max Super Speciality Saket", FacilityKind::Hospital, "Press Enclave Road, Saket", "01126515050", GeoPoint::new(28.5274, 77.2120), true),
    ]
}

#[async_trait]
impl EmergencyApi for MockEmergencyService {
    async fn get_emergency_contacts(&self) -> Result<Vec<EmergencyContact>> {
        self.latency.pause(300).await;
        Ok(self.state.lock().contacts.clone())
    }

    async fn add_emergency_contact(&self, contact: NewEmergencyContact) -> Result<EmergencyContact> {
        self.latency.pause(500).await;
        if !is_valid_phone(&contact.phone) {
            return Err(AppError::rejected(format!("invalid phone number {}", contact.phone)))
                .or_fail("Failed to add emergency contact");
        }

        let mut state = self.state.lock();
        let is_primary = contact.is_primary || state.contacts.is_empty();
        if is_primary {
            state.contacts.iter_mut().for_each(|c| c.is_primary = false);
        }
        let created = EmergencyContact {
            id: generate_mock_id("contact"),
            name: contact.name,
            relationship: contact.relationship,
            phone: contact.phone,
            is_primary,
        };
        state.contacts.push(created.clone());
        Ok(created)
    }

    async fn remove_emergency_contact(&self, contact_id: &str) -> Result<Acknowledgement> {
        self.latency.pause(400).await;
        let mut state = self.state.lock();
        let position = state
            .contacts
            .iter()
            .position(|c| c.id == contact_id)
            .ok_or_else(|| AppError::not_found(format!("contact {}", contact_id)))
            .or_fail("Failed to remove emergency contact")?;

        let removed = state.contacts.remove(position);
        if removed.is_primary {
            if let Some(next) = state.contacts.first_mut() {
                next.is_primary = true;
            }
        }
        Ok(Acknowledgement::ok(format!("{} removed", removed.name)))
    }

    async fn get_emergency_profile(&self) -> Result<EmergencyProfile> {
        self.latency.pause(300).await;
        let state = self.state.lock();
        Ok(EmergencyProfile {
            blood_group: state.profile.blood_group,
            allergies: state.profile.allergies.clone(),
            conditions: state.profile.conditions.clone(),
            medications: state.profile.medications.clone(),
            organ_donor: state.profile.organ_donor,
            notes: state.profile.notes.clone(),
            emergency_contacts: state.contacts.clone(),
        })
    }

    async fn update_emergency_profile(&self, update: EmergencyProfileUpdate) -> Result<EmergencyProfile> {
        self.latency.pause(500).await;
        self.state.lock().profile = update;
        self.get_emergency_profile().await
    }

    async fn trigger_sos(&self, request: SosRequest) -> Result<SosAlert> {
        self.latency.pause(1000).await;
        let mut state = self.state.lock();
        let alert = SosAlert {
            id: generate_mock_id("sos"),
            status: SosStatus::Sent,
            triggered_at: Utc::now(),
            location: request.location,
            notified_contacts: state.contacts.len() as u32,
            eta_minutes: request.location.map(|_| random_between(8, 20)),
        };
        warn!(alert_id = %alert.id, "🧪 mock SOS raised");
        state.alerts.push(alert.clone());
        Ok(alert)
    }

    async fn cancel_sos(&self, alert_id: &str) -> Result<SosAlert> {
        self.latency.pause(500).await;
        let mut state = self.state.lock();
        let result = match state.alerts.iter_mut().find(|a| a.id == alert_id) {
            None => Err(AppError::not_found(format!("SOS alert {}", alert_id))),
            Some(a) if matches!(a.status, SosStatus::Resolved | SosStatus::Cancelled) => {
                Err(AppError::rejected(format!("SOS alert {} already closed", alert_id)))
            }
            Some(a) => {
                a.status = SosStatus::Cancelled;
                info!(alert_id, "🧪 mock SOS cancelled");
                Ok(a.clone())
            }
        };
        result.or_fail("Failed to cancel SOS")
    }

    async fn find_nearby_facilities(&self, query: FacilityQuery) -> Result<Vec<NearbyFacility>> {
        self.latency.pause(800).await;
        let origin = query.origin();
        let mut found: Vec<NearbyFacility> = facilities()
            .into_iter()
            .filter(|(_, _, kind, ..)| query.kind.map_or(true, |k| k == *kind))
            .map(|(id, name, kind, address, phone, location, open_24x7)| NearbyFacility {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                address: address.to_string(),
                phone: phone.to_string(),
                distance_km: (origin.distance_km(&location) * 10.0).round() / 10.0,
                location,
                open_24x7,
            })
            .filter(|f| f.distance_km <= query.radius_km)
            .collect();
        found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockEmergencyService {
        MockEmergencyService::new(MockLatency::disabled())
    }

    fn contact(name: &str, primary: bool) -> NewEmergencyContact {
        NewEmergencyContact {
            name: name.to_string(),
            relationship: "Sibling".to_string(),
            phone: "9000000001".to_string(),
            is_primary: primary,
        }
    }

    #[tokio::test]
    async fn only_one_primary_contact() {
        let svc = service();
        let added = svc.add_emergency_contact(contact("Kavya", true)).await.unwrap();
        assert!(added.is_primary);
        let contacts = svc.get_emergency_contacts().await.unwrap();
        assert_eq!(contacts.iter().filter(|c| c.is_primary).count(), 1);
    }

    #[tokio::test]
    async fn removing_primary_promotes_next() {
        let svc = service();
        svc.remove_emergency_contact("contact-001").await.unwrap();
        let contacts = svc.get_emergency_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(contacts[0].is_primary);

        let err = svc.remove_emergency_contact("contact-001").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to remove emergency contact");
    }

    #[tokio::test]
    async fn invalid_phone_is_refused() {
        let mut bad = contact("Nobody", false);
        bad.phone = "call me".to_string();
        assert!(service().add_emergency_contact(bad).await.is_err());
    }

    #[tokio::test]
    async fn profile_update_round_trips_and_carries_contacts() {
        let svc = service();
        let profile = svc
            .update_emergency_profile(EmergencyProfileUpdate {
                blood_group: Some(BloodGroup::ONegative),
                allergies: vec![],
                conditions: vec!["Type 1 diabetes".to_string()],
                medications: vec!["Insulin".to_string()],
                organ_donor: false,
                notes: Some("Carries glucagon".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(profile.blood_group, Some(BloodGroup::ONegative));
        assert_eq!(profile.emergency_contacts.len(), 2);
        assert_eq!(profile, svc.get_emergency_profile().await.unwrap());
    }

    #[tokio::test]
    async fn sos_lifecycle() {
        let svc = service();
        let alert = svc
            .trigger_sos(SosRequest {
                location: Some(GeoPoint::new(28.61, 77.20)),
                message: None,
            })
            .await
            .unwrap();
        assert_eq!(alert.status, SosStatus::Sent);
        assert_eq!(alert.notified_contacts, 2);
        assert!((8..=20).contains(&alert.eta_minutes.unwrap()));

        let cancelled = svc.cancel_sos(&alert.id).await.unwrap();
        assert_eq!(cancelled.status, SosStatus::Cancelled);
        assert!(svc.cancel_sos(&alert.id).await.is_err());
    }

    #[tokio::test]
    async fn facilities_sorted_and_filtered() {
        let svc = service();
        let origin = GeoPoint::new(28.5672, 77.2100);
        let hospitals = svc
            .find_nearby_facilities(FacilityQuery {
                kind: Some(FacilityKind::Hospital),
                ..FacilityQuery::around(origin, 5.0)
            })
            .await
            .unwrap();
        assert_eq!(hospitals.len(), 3);
        assert_eq!(hospitals[0].id, "fac-001");
        assert!(hospitals.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));

        let tight = svc.find_nearby_facilities(FacilityQuery::around(origin, 0.1)).await.unwrap();
        assert_eq!(tight.len(), 1);
    }
}
