use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::PageRequest;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Individual,
    FamilyFloater,
    /// Ayushman Bharat PM-JAY and state schemes.
    Government,
    CriticalIllness,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Pending,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePolicy {
    pub id: String,
    pub policy_number: String,
    pub insurer_name: String,
    pub plan_name: String,
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    /// Rupees.
    pub sum_insured: u64,
    pub premium: u64,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub members: Vec<String>,
    pub cashless: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyQuery {
    pub include_expired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
}

impl Default for PolicyQuery {
    fn default() -> Self {
        Self {
            include_expired: true,
            policy_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkPolicyRequest {
    pub insurer_id: String,
    pub policy_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Settled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub claim_number: String,
    pub policy_id: String,
    pub hospital_name: String,
    pub diagnosis: String,
    pub amount_claimed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_approved: Option<u64>,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub document_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub policy_id: String,
    pub hospital_name: String,
    pub diagnosis: String,
    pub amount_claimed: u64,
    pub admission_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_date: Option<NaiveDate>,
    #[serde(default)]
    pub document_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl ClaimQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CoverageQuery<'a> {
    pub treatment: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCheck {
    pub policy_id: String,
    pub treatment: String,
    pub covered: bool,
    /// Remaining cover in rupees for this treatment.
    pub coverage_limit: u64,
    pub co_pay_percent: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_period_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
