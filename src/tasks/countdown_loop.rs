use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::models::prayer::DailyPrayerTimes;
use crate::service::clock::Clock;
use crate::service::prayer_selector::CountdownFrame;

struct LiveTicker {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Owns at most one running countdown task.
#[derive(Default)]
pub struct CountdownTicker {
    live: Option<LiveTicker>,
}

impl CountdownTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts emitting a frame now and then once per second. A ticker that
    /// is already running is stopped first.
    pub async fn start<F>(&mut self, times: DailyPrayerTimes, clock: Arc<dyn Clock>, sink: F)
    where
        F: FnMut(CountdownFrame) + Send + 'static,
    {
        self.stop().await;
        let (stop, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(run_countdown_loop(times, clock, stop_rx, sink));
        debug!("countdown ticker started");
        self.live = Some(LiveTicker { stop, handle });
    }

    /// No frame is delivered once this returns.
    pub async fn stop(&mut self) {
        let Some(live) = self.live.take() else {
            return;
        };
        let _ = live.stop.send(true);
        if let Err(err) = live.handle.await {
            if err.is_panic() {
                warn!(error = %err, "countdown ticker panicked");
            }
        }
        debug!("countdown ticker stopped");
    }

    pub fn is_running(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| !live.handle.is_finished())
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        if let Some(live) = self.live.take() {
            live.handle.abort();
        }
    }
}

pub async fn run_countdown_loop<F>(
    times: DailyPrayerTimes,
    clock: Arc<dyn Clock>,
    mut stop: watch::Receiver<bool>,
    mut sink: F,
) where
    F: FnMut(CountdownFrame) + Send + 'static,
{
    let mut ticks = interval(Duration::from_secs(1));
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            // Either a stop request or the ticker itself went away.
            _ = stop.changed() => break,
            _ = ticks.tick() => sink(CountdownFrame::compute(&times, clock.now())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prayer::Prayer;
    use crate::service::clock::FixedClock;
    use chrono::{NaiveDate, NaiveTime};
    use std::sync::Mutex;

    fn times() -> DailyPrayerTimes {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        DailyPrayerTimes {
            subuh: t(4, 30),
            dzuhur: t(12, 0),
            ashar: t(15, 15),
            maghrib: t(17, 45),
            isya: t(19, 0),
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(16, 0, 0)
                .unwrap(),
        ))
    }

    fn recorder() -> (Arc<Mutex<Vec<CountdownFrame>>>, impl FnMut(CountdownFrame) + Send + 'static) {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let sink_frames = frames.clone();
        (frames, move |frame| sink_frames.lock().unwrap().push(frame))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_second_until_stopped() {
        let (frames, sink) = recorder();
        let mut ticker = CountdownTicker::new();
        ticker.start(times(), clock(), sink).await;
        assert!(ticker.is_running());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        ticker.stop().await;
        assert!(!ticker.is_running());

        let seen = frames.lock().unwrap().len();
        assert!((3..=4).contains(&seen), "saw {seen} frames");
        let first = frames.lock().unwrap()[0];
        assert_eq!(first.prayer, Prayer::Maghrib);
        assert_eq!(first.countdown.to_string(), "01:45:00");

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(frames.lock().unwrap().len(), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_replaces_the_running_timer() {
        let (first_frames, first_sink) = recorder();
        let (second_frames, second_sink) = recorder();
        let mut ticker = CountdownTicker::new();

        ticker.start(times(), clock(), first_sink).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        ticker.start(times(), clock(), second_sink).await;
        let first_seen = first_frames.lock().unwrap().len();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(first_frames.lock().unwrap().len(), first_seen);
        assert!(second_frames.lock().unwrap().len() >= 2);
        ticker.stop().await;
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let mut ticker = CountdownTicker::new();
        ticker.stop().await;
        assert!(!ticker.is_running());
    }
}
