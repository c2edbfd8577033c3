//! Health insurance policies and claims

pub mod live;
pub mod mock;
pub mod models;

pub use live::LiveInsuranceService;
pub use mock::MockInsuranceService;
pub use models::*;

use async_trait::async_trait;
use shared::Result;

#[async_trait]
pub trait InsuranceApi: Send + Sync {
    /// With `include_expired: false`, no expired policy is returned.
    async fn get_policies(&self, query: PolicyQuery) -> Result<Vec<InsurancePolicy>>;

    async fn get_policy(&self, policy_id: &str) -> Result<InsurancePolicy>;

    async fn link_policy(&self, request: LinkPolicyRequest) -> Result<InsurancePolicy>;

    async fn get_claims(&self, query: ClaimQuery) -> Result<Vec<Claim>>;

    async fn submit_claim(&self, claim: NewClaim) -> Result<Claim>;

    async fn get_claim(&self, claim_id: &str) -> Result<Claim>;

    async fn check_coverage(&self, policy_id: &str, treatment: &str) -> Result<CoverageCheck>;
}
