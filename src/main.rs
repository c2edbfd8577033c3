use anyhow::Result;
use ayusetu::domains::abdm::CreateHealthIdRequest;
use ayusetu::domains::insurance::PolicyQuery;
use ayusetu::domains::notifications::NotificationQuery;
use ayusetu::{AppServices, Config};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_AADHAAR: &str = "123456789012";
const DEFAULT_OTP: &str = "000000";

fn print_step<T: Serialize>(step: &str, value: &T) -> Result<()> {
    println!("== {} ==\n{}", step, serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .init();

    let services = AppServices::from_config(&config)?;
    info!(mode = %services.mode, environment = %config.environment, "🚀 AyuSetu services initialized");

    // Usage: ayusetu [aadhaar] [otp]
    let mut args = std::env::args().skip(1);
    let aadhaar = args.next().unwrap_or_else(|| DEFAULT_AADHAAR.to_string());
    let otp = args.next().unwrap_or_else(|| DEFAULT_OTP.to_string());

    let session = services.abdm.get_session_token().await?;
    print_step("session", &session)?;

    let transaction = services.abdm.generate_aadhaar_otp(&aadhaar).await?;
    print_step("generate aadhaar otp", &transaction)?;

    let verification = services
        .abdm
        .verify_aadhaar_otp(&otp, &transaction.txn_id)
        .await?;
    print_step("verify aadhaar otp", &verification)?;

    let profile = services
        .abdm
        .create_health_id_with_aadhaar(CreateHealthIdRequest::new(&verification.txn_id))
        .await?;
    print_step("create health id", &profile)?;

    let (unread, policies, appointments) = futures::try_join!(
        services.notifications.get_unread_count(),
        services.insurance.get_policies(PolicyQuery {
            include_expired: false,
            policy_type: None,
        }),
        services.appointments.get_appointments(Default::default()),
    )?;
    print_step("unread notifications", &unread)?;
    print_step("active policies", &policies)?;
    print_step("appointments", &appointments)?;

    let recent = services
        .notifications
        .get_notifications(NotificationQuery {
            limit: Some(3),
            ..Default::default()
        })
        .await?;
    print_step("recent notifications", &recent)?;

    info!("✅ Smoke run complete");
    Ok(())
}
