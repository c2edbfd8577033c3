use super::models::*;
use super::InsuranceApi;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use shared::utils::{generate_mock_id, random_between, timestamp_millis};
use shared::{AppError, MockLatency, OperationContext, Result};
use tracing::info;

/// Days a new policy waits before planned procedures are covered.
const WAITING_PERIOD_DAYS: i64 = 30;

/// Treatments excluded by every fixture plan.
const EXCLUDED_TREATMENTS: &[&str] = &["cosmetic", "dental implant", "infertility"];

pub struct MockInsuranceService {
    latency: MockLatency,
    policies: Mutex<Vec<InsurancePolicy>>,
    claims: Mutex<Vec<Claim>>,
}

impl MockInsuranceService {
    pub fn new(latency: MockLatency) -> Self {
        let today = Utc::now().date_naive();

        let policies = vec![
            InsurancePolicy {
                id: "pol-001".to_string(),
                policy_number: "PMJAY-DL-2024-448812".to_string(),
                insurer_name: "National Health Authority".to_string(),
                plan_name: "Ayushman Bharat PM-JAY".to_string(),
                policy_type: PolicyType::Government,
                status: PolicyStatus::Active,
                sum_insured: 500_000,
                premium: 0,
                valid_from: today - Duration::days(200),
                valid_to: today + Duration::days(165),
                members: vec!["Dev User".to_string()],
                cashless: true,
            },
            InsurancePolicy {
                id: "pol-002".to_string(),
                policy_number: "SH-FF-7781204".to_string(),
                insurer_name: "Star Health".to_string(),
                plan_name: "Family Health Optima".to_string(),
                policy_type: PolicyType::FamilyFloater,
                status: PolicyStatus::Active,
                sum_insured: 1_000_000,
                premium: 24_500,
                valid_from: today - Duration::days(90),
                valid_to: today + Duration::days(275),
                members: vec!["Dev User".to_string(), "Asha User".to_string()],
                cashless: true,
            },
            InsurancePolicy {
                id: "pol-003".to_string(),
                policy_number: "HDFC-IND-3390021".to_string(),
                insurer_name: "HDFC ERGO".to_string(),
                plan_name: "Optima Secure".to_string(),
                policy_type: PolicyType::Individual,
                status: PolicyStatus::Expired,
                sum_insured: 300_000,
                premium: 9_800,
                valid_from: today - Duration::days(800),
                valid_to: today - Duration::days(435),
                members: vec!["Dev User".to_string()],
                cashless: false,
            },
        ];

        let claims = vec![Claim {
            id: "clm-001".to_string(),
            claim_number: "CLM-2024-000187".to_string(),
            policy_id: "pol-002".to_string(),
            hospital_name: "Max Super Speciality Hospital, Saket".to_string(),
            diagnosis: "Dengue fever".to_string(),
            amount_claimed: 68_000,
            amount_approved: Some(61_500),
            status: ClaimStatus::Settled,
            submitted_at: Utc::now() - Duration::days(40),
            document_ids: vec!["rec-discharge-01".to_string()],
        }];

        Self {
            latency,
            policies: Mutex::new(policies),
            claims: Mutex::new(claims),
        }
    }

    fn find_policy(&self, policy_id: &str) -> Result<InsurancePolicy> {
        self.policies
            .lock()
            .iter()
            .find(|p| p.id == policy_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("policy {}", policy_id)))
    }
}

fn is_expired(policy: &InsurancePolicy, today: NaiveDate) -> bool {
    policy.status == PolicyStatus::Expired || policy.valid_to < today
}

#[async_trait]
impl InsuranceApi for MockInsuranceService {
    async fn get_policies(&self, query: PolicyQuery) -> Result<Vec<InsurancePolicy>> {
        self.latency.pause(600).await;
        let today = Utc::now().date_naive();
        Ok(self
            .policies
            .lock()
            .iter()
            .filter(|p| query.include_expired || !is_expired(p, today))
            .filter(|p| query.policy_type.map_or(true, |t| p.policy_type == t))
            .cloned()
            .collect())
    }

    async fn get_policy(&self, policy_id: &str) -> Result<InsurancePolicy> {
        self.latency.pause(400).await;
        self.find_policy(policy_id).or_fail("Failed to fetch policy")
    }

    async fn link_policy(&self, request: LinkPolicyRequest) -> Result<InsurancePolicy> {
        self.latency.pause(1200).await;

        let mut policies = self.policies.lock();
        if policies.iter().any(|p| p.policy_number == request.policy_number) {
            return Err(AppError::rejected(format!(
                "policy {} is already linked",
                request.policy_number
            )))
            .or_fail("Failed to link policy");
        }

        let today = Utc::now().date_naive();
        let policy = InsurancePolicy {
            id: generate_mock_id("pol"),
            policy_number: request.policy_number,
            insurer_name: request.insurer_id.to_uppercase(),
            plan_name: "Linked Health Plan".to_string(),
            policy_type: PolicyType::Individual,
            status: PolicyStatus::Pending,
            sum_insured: 500_000,
            premium: 12_000,
            valid_from: today,
            valid_to: today + Duration::days(365),
            members: vec!["Dev User".to_string()],
            cashless: true,
        };
        info!(policy_id = %policy.id, insurer = %policy.insurer_name, "🧪 mock policy linked");
        policies.push(policy.clone());
        Ok(policy)
    }

    async fn get_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>> {
        self.latency.pause(500).await;
        let matches: Vec<Claim> = self
            .claims
            .lock()
            .iter()
            .filter(|c| query.policy_id.as_deref().map_or(true, |id| c.policy_id == id))
            .filter(|c| query.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        Ok(query.page().apply(&matches))
    }

    async fn submit_claim(&self, claim: NewClaim) -> Result<Claim> {
        self.latency.pause(1500).await;

        let policy = self.find_policy(&claim.policy_id).or_fail("Failed to submit claim")?;
        if is_expired(&policy, claim.admission_date) {
            return Err(AppError::rejected(format!(
                "policy {} was not active on {}",
                policy.id, claim.admission_date
            )))
            .or_fail("Failed to submit claim");
        }
        if claim.amount_claimed > policy.sum_insured {
            return Err(AppError::rejected("claimed amount exceeds sum insured"))
                .or_fail("Failed to submit claim");
        }

        let record = Claim {
            id: generate_mock_id("clm"),
            claim_number: format!("CLM-DEV-{}", timestamp_millis()),
            policy_id: claim.policy_id,
            hospital_name: claim.hospital_name,
            diagnosis: claim.diagnosis,
            amount_claimed: claim.amount_claimed,
            amount_approved: None,
            status: ClaimStatus::Submitted,
            submitted_at: Utc::now(),
            document_ids: claim.document_ids,
        };
        info!(claim_id = %record.id, amount = record.amount_claimed, "🧪 mock claim submitted");
        self.claims.lock().push(record.clone());
        Ok(record)
    }

    async fn get_claim(&self, claim_id: &str) -> Result<Claim> {
        self.latency.pause(400).await;
        self.claims
            .lock()
            .iter()
            .find(|c| c.id == claim_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("claim {}", claim_id)))
            .or_fail("Failed to fetch claim")
    }

    async fn check_coverage(&self, policy_id: &str, treatment: &str) -> Result<CoverageCheck> {
        self.latency.pause(800).await;

        let policy = self.find_policy(policy_id).or_fail("Failed to check coverage")?;
        let today = Utc::now().date_naive();
        let normalized = treatment.trim().to_lowercase();
        let excluded = EXCLUDED_TREATMENTS.iter().any(|t| normalized.contains(t));
        let expired = is_expired(&policy, today);
        let waiting = (today - policy.valid_from).num_days() < WAITING_PERIOD_DAYS;

        let claimed: u64 = self
            .claims
            .lock()
            .iter()
            .filter(|c| c.policy_id == policy.id)
            .map(|c| c.amount_approved.unwrap_or(c.amount_claimed))
            .sum();

        let notes = if expired {
            Some(format!("policy expired on {}", policy.valid_to))
        } else if excluded {
            Some("treatment is a standard exclusion".to_string())
        } else if waiting {
            Some("initial waiting period applies".to_string())
        } else {
            None
        };

        Ok(CoverageCheck {
            policy_id: policy.id,
            treatment: treatment.to_string(),
            covered: !(expired || excluded || waiting),
            coverage_limit: policy.sum_insured.saturating_sub(claimed),
            co_pay_percent: match policy.policy_type {
                PolicyType::Government => 0,
                _ => random_between(0, 2) as u8 * 10,
            },
            waiting_period_days: waiting.then_some(WAITING_PERIOD_DAYS as u32),
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockInsuranceService {
        MockInsuranceService::new(MockLatency::disabled())
    }

    #[tokio::test]
    async fn expired_policies_are_hidden_on_request() {
        let svc = service();
        let all = svc.get_policies(PolicyQuery::default()).await.unwrap();
        assert!(all.iter().any(|p| p.status == PolicyStatus::Expired));

        let current = svc
            .get_policies(PolicyQuery {
                include_expired: false,
                policy_type: None,
            })
            .await
            .unwrap();
        assert!(!current.is_empty());
        assert!(current.iter().all(|p| p.status != PolicyStatus::Expired));
    }

    #[tokio::test]
    async fn policy_type_filter() {
        let policies = service()
            .get_policies(PolicyQuery {
                include_expired: true,
                policy_type: Some(PolicyType::Government),
            })
            .await
            .unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].id, "pol-001");
    }

    #[tokio::test]
    async fn linking_same_policy_twice_fails() {
        let svc = service();
        let request = LinkPolicyRequest {
            insurer_id: "icici".to_string(),
            policy_number: "ICICI-778".to_string(),
            date_of_birth: None,
        };
        let linked = svc.link_policy(request.clone()).await.unwrap();
        assert_eq!(linked.status, PolicyStatus::Pending);
        assert_eq!(svc.get_policy(&linked.id).await.unwrap(), linked);

        let err = svc.link_policy(request).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to link policy");
    }

    #[tokio::test]
    async fn claim_lifecycle() {
        let svc = service();
        let claim = svc
            .submit_claim(NewClaim {
                policy_id: "pol-001".to_string(),
                hospital_name: "Safdarjung Hospital".to_string(),
                diagnosis: "Appendicitis".to_string(),
                amount_claimed: 45_000,
                admission_date: Utc::now().date_naive(),
                discharge_date: None,
                document_ids: vec![],
            })
            .await
            .unwrap();
        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert_eq!(svc.get_claim(&claim.id).await.unwrap(), claim);

        let for_policy = svc
            .get_claims(ClaimQuery {
                policy_id: Some("pol-001".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(for_policy, vec![claim]);
    }

    #[tokio::test]
    async fn claims_against_expired_policy_are_rejected() {
        let err = service()
            .submit_claim(NewClaim {
                policy_id: "pol-003".to_string(),
                hospital_name: "Apollo".to_string(),
                diagnosis: "Fracture".to_string(),
                amount_claimed: 20_000,
                admission_date: Utc::now().date_naive(),
                discharge_date: None,
                document_ids: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err.root_cause(), AppError::Rejected { .. }));
    }

    #[tokio::test]
    async fn coverage_reflects_exclusions_and_prior_claims() {
        let svc = service();
        let surgery = svc.check_coverage("pol-002", "Knee replacement").await.unwrap();
        assert!(surgery.covered);
        assert_eq!(surgery.coverage_limit, 1_000_000 - 61_500);

        let cosmetic = svc.check_coverage("pol-002", "Cosmetic rhinoplasty").await.unwrap();
        assert!(!cosmetic.covered);

        let expired = svc.check_coverage("pol-003", "Knee replacement").await.unwrap();
        assert!(!expired.covered);
        assert!(svc.check_coverage("pol-404", "anything").await.is_err());
    }
}
