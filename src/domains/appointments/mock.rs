use super::models::*;
use super::AppointmentApi;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use parking_lot::Mutex;
use shared::utils::generate_mock_id;
use shared::{AppError, MockLatency, OperationContext, Result};
use tracing::info;

/// IST is UTC+05:30.
const IST_OFFSET_MINUTES: i64 = 330;
const SLOT_MINUTES: i64 = 30;
const CLINIC_OPEN_HOUR: u32 = 9;
const CLINIC_CLOSE_HOUR: u32 = 17;

pub struct MockAppointmentService {
    latency: MockLatency,
    appointments: Mutex<Vec<Appointment>>,
}

impl MockAppointmentService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            latency,
            appointments: Mutex::new(Vec::new()),
        }
    }

    fn slot_taken(&self, slot_id: &str) -> bool {
        self.appointments
            .lock()
            .iter()
            .any(|a| a.slot_id == slot_id && a.status == AppointmentStatus::Scheduled)
    }
}

fn specialties() -> Vec<Specialty> {
    [
        ("general-medicine", "General Medicine", "Primary care and common illnesses"),
        ("cardiology", "Cardiology", "Heart and blood vessel conditions"),
        ("dermatology", "Dermatology", "Skin, hair and nail care"),
        ("pediatrics", "Pediatrics", "Care for infants and children"),
        ("orthopedics", "Orthopedics", "Bones, joints and muscles"),
    ]
    .into_iter()
    .map(|(id, name, description)| Specialty {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn doctors() -> Vec<Doctor> {
    use ConsultationMode::*;
    let doctor = |id: &str,
                  name: &str,
                  specialty: &str,
                  qualification: &str,
                  hospital: &str,
                  city: &str,
                  experience: u32,
                  fee: u32,
                  rating: f32,
                  modes: Vec<ConsultationMode>| Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        qualification: qualification.to_string(),
        hospital_name: hospital.to_string(),
        city: city.to_string(),
        experience_years: experience,
        consultation_fee: fee,
        rating,
        languages: vec!["English".to_string(), "Hindi".to_string()],
        modes,
    };

    vec![
        doctor("doc-001", "Dr. Priya Sharma", "general-medicine", "MBBS, MD", "AIIMS", "New Delhi", 12, 500, 4.5, vec![InPerson, Teleconsultation]),
        doctor("doc-002", "Dr. Rajesh Iyer", "cardiology", "MBBS, DM Cardiology", "Apollo Hospitals", "Chennai", 18, 1200, 4.75, vec![InPerson]),
        doctor("doc-003", "Dr. Ananya Gupta", "dermatology", "MBBS, MD Dermatology", "Fortis", "Mumbai", 8, 800, 4.25, vec![Teleconsultation]),
        doctor("doc-004", "Dr. Suresh Patel", "pediatrics", "MBBS, DCH", "Civil Hospital", "Ahmedabad", 15, 400, 4.5, vec![InPerson, Teleconsultation]),
        doctor("doc-005", "Dr. Meera Nair", "orthopedics", "MBBS, MS Ortho", "Manipal Hospital", "Bengaluru", 10, 900, 4.0, vec![InPerson]),
    ]
}

fn slot_id(doctor_id: &str, date: NaiveDate, time: NaiveTime) -> String {
    format!("slot-{}-{}-{}", doctor_id, date.format("%Y%m%d"), time.format("%H%M"))
}

/// Reverses `slot_id`. Doctor ids contain dashes, so split from the right.
fn parse_slot_id(id: &str) -> Option<(String, NaiveDate, NaiveTime)> {
    let rest = id.strip_prefix("slot-")?;
    let mut parts = rest.rsplitn(3, '-');
    let time = NaiveTime::parse_from_str(parts.next()?, "%H%M").ok()?;
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let doctor_id = parts.next()?.to_string();
    Some((doctor_id, date, time))
}

fn ist_to_utc(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let local = date.and_time(time);
    DateTime::<Utc>::from_naive_utc_and_offset(local - Duration::minutes(IST_OFFSET_MINUTES), Utc)
}

fn clinic_times() -> impl Iterator<Item = NaiveTime> {
    let per_hour = (60 / SLOT_MINUTES) as u32;
    (CLINIC_OPEN_HOUR * per_hour..CLINIC_CLOSE_HOUR * per_hour)
        .filter_map(move |i| NaiveTime::from_hms_opt(i / per_hour, (i % per_hour) * SLOT_MINUTES as u32, 0))
}

/// Every third slot is pre-booked so the day never looks empty.
fn prebooked(index: usize) -> bool {
    index % 3 == 2
}

#[async_trait]
impl AppointmentApi for MockAppointmentService {
    async fn get_specialties(&self) -> Result<Vec<Specialty>> {
        self.latency.pause(300).await;
        Ok(specialties())
    }

    async fn search_doctors(&self, query: DoctorQuery) -> Result<Vec<Doctor>> {
        self.latency.pause(600).await;
        let matches: Vec<Doctor> = doctors()
            .into_iter()
            .filter(|d| query.specialty.as_deref().map_or(true, |s| d.specialty == s))
            .filter(|d| {
                query
                    .city
                    .as_deref()
                    .map_or(true, |c| d.city.eq_ignore_ascii_case(c))
            })
            .filter(|d| query.mode.map_or(true, |m| d.modes.contains(&m)))
            .collect();
        Ok(query.page().apply(&matches))
    }

    async fn get_available_slots(&self, doctor_id: &str, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        self.latency.pause(500).await;
        if !doctors().iter().any(|d| d.id == doctor_id) {
            return Err(AppError::not_found(format!("doctor {}", doctor_id)))
                .or_fail("Failed to fetch available slots");
        }

        Ok(clinic_times()
            .enumerate()
            .map(|(index, time)| {
                let id = slot_id(doctor_id, date, time);
                let start_time = ist_to_utc(date, time);
                TimeSlot {
                    available: !prebooked(index) && !self.slot_taken(&id),
                    id,
                    doctor_id: doctor_id.to_string(),
                    start_time,
                    end_time: start_time + Duration::minutes(SLOT_MINUTES),
                }
            })
            .collect())
    }

    async fn book_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment> {
        self.latency.pause(1200).await;
        book(self, request).or_fail("Failed to book appointment")
    }

    async fn get_appointments(&self, query: AppointmentQuery) -> Result<Vec<Appointment>> {
        self.latency.pause(400).await;
        let now = Utc::now();
        let mut matches: Vec<Appointment> = self
            .appointments
            .lock()
            .iter()
            .filter(|a| query.status.map_or(true, |s| a.status == s))
            .filter(|a| !query.upcoming_only.unwrap_or(false) || a.start_time > now)
            .cloned()
            .collect();
        matches.sort_by_key(|a| a.start_time);
        Ok(query.page().apply(&matches))
    }

    async fn cancel_appointment(&self, appointment_id: &str, reason: Option<String>) -> Result<Appointment> {
        self.latency.pause(600).await;
        let mut appointments = self.appointments.lock();
        let result = match appointments.iter_mut().find(|a| a.id == appointment_id) {
            None => Err(AppError::not_found(format!("appointment {}", appointment_id))),
            Some(a) if a.status != AppointmentStatus::Scheduled => {
                Err(AppError::rejected(format!("appointment {} is not scheduled", appointment_id)))
            }
            Some(a) => {
                a.status = AppointmentStatus::Cancelled;
                a.cancellation_reason = reason;
                info!(appointment_id, "🧪 mock appointment cancelled");
                Ok(a.clone())
            }
        };
        result.or_fail("Failed to cancel appointment")
    }
}

fn book(service: &MockAppointmentService, request: BookAppointmentRequest) -> Result<Appointment> {
    let doctor = doctors()
        .into_iter()
        .find(|d| d.id == request.doctor_id)
        .ok_or_else(|| AppError::not_found(format!("doctor {}", request.doctor_id)))?;

    if !doctor.modes.contains(&request.mode) {
        return Err(AppError::rejected(format!(
            "{} does not offer {:?} consultations",
            doctor.name, request.mode
        )));
    }

    let (slot_doctor, date, time) = parse_slot_id(&request.slot_id)
        .filter(|(slot_doctor, _, _)| *slot_doctor == doctor.id)
        .ok_or_else(|| AppError::not_found(format!("slot {}", request.slot_id)))?;

    let index = clinic_times()
        .position(|t| t == time)
        .ok_or_else(|| AppError::not_found(format!("slot {}", request.slot_id)))?;

    let mut appointments = service.appointments.lock();
    let taken = appointments
        .iter()
        .any(|a| a.slot_id == request.slot_id && a.status == AppointmentStatus::Scheduled);
    if prebooked(index) || taken {
        return Err(AppError::rejected(format!("slot {} is no longer available", request.slot_id)));
    }

    let start_time = ist_to_utc(date, time);
    let appointment = Appointment {
        id: generate_mock_id("apt"),
        doctor_id: slot_doctor,
        doctor_name: doctor.name,
        specialty: doctor.specialty,
        slot_id: request.slot_id,
        start_time,
        end_time: start_time + Duration::minutes(SLOT_MINUTES),
        mode: request.mode,
        status: AppointmentStatus::Scheduled,
        reason: request.reason,
        booked_at: Utc::now(),
        cancellation_reason: None,
    };

    info!(appointment_id = %appointment.id, "🧪 mock appointment booked");
    appointments.push(appointment.clone());
    Ok(appointment)
}
