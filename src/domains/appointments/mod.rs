//! Doctor discovery and appointment booking

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveAppointmentService;
pub use mock::MockAppointmentService;
pub use models::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::Result;

#[async_trait]
pub trait AppointmentApi: Send + Sync {
    async fn get_specialties(&self) -> Result<Vec<Specialty>>;

    async fn search_doctors(&self, query: DoctorQuery) -> Result<Vec<Doctor>>;

    /// Slots for one doctor on one calendar day (IST).
    async fn get_available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<TimeSlot>>;

    async fn book_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment>;

    async fn get_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>>;

    async fn cancel_appointment(&self, appointment_id: &str, reason: Option<String>) -> Result<Appointment>;
}
