use std::time::Duration;

use rand::Rng;

/// Picks a pause uniformly from `min_secs..=max_secs`.
pub fn random_page_delay(min_secs: f64, max_secs: f64) -> Duration {
    let secs = rand::thread_rng().gen_range(min_secs..=max_secs);
    Duration::from_secs_f64(secs)
}

pub async fn politeness_pause(min_secs: f64, max_secs: f64) {
    let delay = random_page_delay(min_secs, max_secs);
    log::info!("Pausing for {:.2} seconds.", delay.as_secs_f64());
    tokio::time::sleep(delay).await;
}
