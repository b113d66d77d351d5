use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ApiError;
use crate::service::clock::Clock;
use crate::service::display::format_hm;
use crate::service::home_service::load_prayer_card;
use crate::service::myquran_service::PrayerSource;
use crate::service::prayer_selector::CountdownFrame;
use crate::tasks::countdown_loop::CountdownTicker;

pub fn render_frame(frame: &CountdownFrame) -> String {
    format!(
        "Menuju {} ({}) -{}",
        frame.prayer,
        format_hm(frame.scheduled),
        frame.countdown
    )
}

/// Live countdown to the next prayer until Ctrl-C.
pub async fn run_countdown(
    prayer: &dyn PrayerSource,
    city_id: &str,
    clock: Arc<dyn Clock>,
) -> Result<(), ApiError> {
    let card = load_prayer_card(prayer, city_id, clock.now()).await?;
    info!(location = %card.location, "starting countdown");
    println!("{}", card.location);

    let mut ticker = CountdownTicker::new();
    ticker
        .start(card.times, clock, |frame| {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\r{}   ", render_frame(&frame));
            let _ = out.flush();
        })
        .await;

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "unable to listen for Ctrl-C");
    }
    ticker.stop().await;
    println!();
    Ok(())
}
