use super::models::*;
use super::InsuranceApi;
use async_trait::async_trait;
use shared::{OperationContext, Result, ServiceClient};

pub struct LiveInsuranceService {
    client: ServiceClient,
}

impl LiveInsuranceService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InsuranceApi for LiveInsuranceService {
    async fn get_policies(&self, query: PolicyQuery) -> Result<Vec<InsurancePolicy>> {
        self.client
            .get_query("/insurance/policies", &query)
            .await
            .or_fail("Failed to fetch policies")
    }

    async fn get_policy(&self, policy_id: &str) -> Result<InsurancePolicy> {
        let endpoint = ServiceClient::endpoint(&["insurance", "policies", policy_id])
            .or_fail("Failed to fetch policy")?;
        self.client
            .get(&endpoint)
            .await
            .or_fail("Failed to fetch policy")
    }

    async fn link_policy(&self, request: LinkPolicyRequest) -> Result<InsurancePolicy> {
        self.client
            .post("/insurance/policies/link", &request)
            .await
            .or_fail("Failed to link policy")
    }

    async fn get_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>> {
        self.client
            .get_query("/insurance/claims", &query)
            .await
            .or_fail("Failed to fetch claims")
    }

    async fn submit_claim(&self, claim: NewClaim) -> Result<Claim> {
        self.client
            .post("/insurance/claims", &claim)
            .await
            .or_fail("Failed to submit claim")
    }

    async fn get_claim(&self, claim_id: &str) -> Result<Claim> {
        let endpoint = ServiceClient::endpoint(&["insurance", "claims", claim_id])
            .or_fail("Failed to fetch claim")?;
        self.client
            .get(&endpoint)
            .await
            .or_fail("Failed to fetch claim")
    }

    async fn check_coverage(&self, policy_id: &str, treatment: &str) -> Result<CoverageCheck> {
        let endpoint = ServiceClient::endpoint(&["insurance", "policies", policy_id, "coverage"])
            .or_fail("Failed to check coverage")?;
        self.client
            .get_query(&endpoint, &CoverageQuery { treatment })
            .await
            .or_fail("Failed to check coverage")
    }
}
