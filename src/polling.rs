use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::{
    api::status::get_status,
    event::{Event, EventSender},
    protocols::http::HyperHttpClient,
    settings::Settings,
};

/// Every tick starts its own request, so requests overlap against a slow
/// server. Each one is bounded by the request timeout.
pub fn start_status_poll_loop(
    settings: &Settings,
    http_client: &HyperHttpClient,
    tx: &EventSender,
) {
    let settings = settings.clone();
    let http_client = http_client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_millis(settings.server.poll_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if tx.is_closed() {
                break;
            }

            let settings = settings.clone();
            let http_client = http_client.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                match get_status(&settings, &http_client).await {
                    Ok(snapshot) => {
                        let _ = tx.send(Event::Status(snapshot));
                    }
                    Err(e) => log::warn!("Failed to poll device status: {:?}", e),
                }
            });
        }
    });
}
