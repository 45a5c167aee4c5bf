use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Start the periodic notification batch on the configured cron schedule.
pub async fn start_notification_scheduler(
    state: AppState,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let scheduler = JobScheduler::new().await?;
    let schedule = state.config.notification_cron.clone();

    let job = Job::new_async(schedule.as_str(), move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            if let Err(e) = run_scheduled_batch(state).await {
                error!("Error running notification batch: {:?}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!("Notification scheduler started with schedule {}", schedule);
    Ok(())
}

async fn run_scheduled_batch(state: AppState) -> Result<()> {
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or_else(|| AppError::Config("RESEND_API_KEY is not configured".to_string()))?;

    let summary = dispatcher.run_batch(Utc::now()).await?;
    info!(
        "notification batch processed {} reminders and {} subscriptions ({} sent, {} skipped)",
        summary.reminders.attempted,
        summary.subscriptions.attempted,
        summary.reminders.sent + summary.subscriptions.sent,
        summary.reminders.skipped + summary.subscriptions.skipped
    );

    Ok(())
}
