//! Evaluation reminder job binary entrypoint.
//!
//! Invoked periodically by an external scheduler. Runs one batch and
//! prints the structured run report as JSON on stdout; logs go to stderr.

use tracing_subscriber::EnvFilter;

use evalsys_common::config::AppConfig;
use evalsys_store::DocumentsClient;

use evalsys_reminder::job::ReminderJob;
use evalsys_reminder::mailer::SmtpMailer;
use evalsys_reminder::store::AppwriteEvaluationStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the run report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("evalsys_reminder=info,evalsys_store=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting email reminder check...");

    // Load configuration
    let config = AppConfig::from_env()?;

    let client = DocumentsClient::new(
        &config.appwrite_endpoint,
        &config.appwrite_project_id,
        &config.appwrite_api_key,
    )?;
    let store = AppwriteEvaluationStore::new(client, &config);
    let mailer = SmtpMailer::new(&config);

    let job = ReminderJob::new(&store, &mailer, &config.domain_url);
    let report = job.run(chrono::Utc::now()).await;

    println!("{}", serde_json::to_string(&report)?);

    if !report.success {
        std::process::exit(1);
    }

    tracing::info!("Email reminder check finished.");
    Ok(())
}
