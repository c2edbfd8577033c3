use super::models::*;
use super::AppointmentApi;
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{OperationContext, Result, ServiceClient};

pub struct LiveAppointmentService {
    client: ServiceClient,
}

impl LiveAppointmentService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AppointmentApi for LiveAppointmentService {
    async fn get_specialties(&self) -> Result<Vec<Specialty>> {
        self.client
            .get("/appointments/specialties")
            .await
            .or_fail("Failed to fetch specialties")
    }

    async fn search_doctors(&self, query: DoctorQuery) -> Result<Vec<Doctor>> {
        self.client
            .get_query("/appointments/doctors", &query)
            .await
            .or_fail("Failed to fetch doctors")
    }

    async fn get_available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        let endpoint = ServiceClient::endpoint(&["appointments", "doctors", doctor_id, "slots"])
            .or_fail("Failed to fetch available slots")?;
        self.client
            .get_query(&endpoint, &SlotQuery { date })
            .await
            .or_fail("Failed to fetch available slots")
    }

    async fn book_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment> {
        self.client
            .post("/appointments", &request)
            .await
            .or_fail("Failed to book appointment")
    }

    async fn get_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>> {
        self.client
            .get_query("/appointments", &query)
            .await
            .or_fail("Failed to fetch appointments")
    }

    async fn cancel_appointment(&self, appointment_id: &str, reason: Option<String>) -> Result<Appointment> {
        let endpoint = ServiceClient::endpoint(&["appointments", appointment_id, "cancel"])
            .or_fail("Failed to cancel appointment")?;
        self.client
            .post(&endpoint, &CancelAppointmentRequest { reason })
            .await
            .or_fail("Failed to cancel appointment")
    }
}
