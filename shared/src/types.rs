//! Common types used across all domain services

use serde::{Deserialize, Serialize};

/// Body returned by operations that have no resource to hand back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Acknowledgement {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// `limit`/`offset` pagination as accepted by the list endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Slice an in-memory list the way the server paginates.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let offset = self.offset.unwrap_or(0) as usize;
        let iter = items.iter().skip(offset).cloned();
        match self.limit {
            Some(limit) => iter.take(limit as usize).collect(),
            None => iter.collect(),
        }
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_slices() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(PageRequest::new(3, 2).apply(&items), vec![2, 3, 4]);
        assert_eq!(PageRequest::default().apply(&items).len(), 10);
        assert!(PageRequest::new(5, 20).apply(&items).is_empty());
    }

    #[test]
    fn empty_page_request_serializes_to_nothing() {
        let json = serde_json::to_string(&PageRequest::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn acknowledgement_omits_missing_message() {
        let ack = Acknowledgement { success: true, message: None };
        assert_eq!(serde_json::to_string(&ack).unwrap(), r#"{"success":true}"#);
        let parsed: Acknowledgement = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!parsed.success);
    }

    #[test]
    fn distance_between_delhi_and_mumbai() {
        let delhi = GeoPoint::new(28.6139, 77.2090);
        let mumbai = GeoPoint::new(19.0760, 72.8777);
        let km = delhi.distance_km(&mumbai);
        assert!((1100.0..1200.0).contains(&km), "got {km}");
    }
}
