use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{Stream, StreamExt};
use image::DynamicImage;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    /// Time to advance animations and redraw
    Frame,
}

/// Result of an async asset load, keyed by the asset's relative path
pub enum AssetLoadResult {
    Success { key: String, image: DynamicImage },
    Failure { key: String, error: String },
}

/// Merges terminal input with a frame clock.
///
/// The clock runs at the frame rate while something is animating and drops
/// to the idle rate otherwise.
pub struct EventHandler<S = EventStream> {
    stream: S,
    frame_duration: Duration,
    idle_duration: Duration,
    animating: bool,
    ticker: Interval,
}

impl EventHandler<EventStream> {
    pub fn new(frame_duration: Duration, idle_duration: Duration) -> Self {
        Self::with_stream(EventStream::new(), frame_duration, idle_duration)
    }
}

impl<S> EventHandler<S>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    pub fn with_stream(stream: S, frame_duration: Duration, idle_duration: Duration) -> Self {
        let frame_duration = frame_duration.max(Duration::from_millis(1));
        let idle_duration = idle_duration.max(frame_duration);
        Self {
            stream,
            frame_duration,
            idle_duration,
            animating: true,
            ticker: ticker(frame_duration),
        }
    }

    /// Switch between the fast and idle frame clock
    pub fn set_animating(&mut self, animating: bool) {
        if animating == self.animating {
            return;
        }
        self.animating = animating;
        self.ticker = ticker(if animating {
            self.frame_duration
        } else {
            self.idle_duration
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Result<AppEvent> {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(AppEvent::Frame),
                maybe_event = self.stream.next() => {
                    let event = maybe_event.ok_or_else(|| anyhow!("terminal event stream closed"))??;
                    if let Some(event) = translate(event) {
                        return Ok(event);
                    }
                }
            }
        }
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::FocusGained => Some(AppEvent::FocusGained),
        Event::FocusLost => Some(AppEvent::FocusLost),
        _ => None,
    }
}
