use chrono::{DateTime, Local};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::api::status::StatusSnapshot;

/// Background tasks only ever send these to the UI loop.
#[derive(Debug, Clone)]
pub enum Event {
    Terminal(CrosstermEvent),
    Status(StatusSnapshot),
    Clock(DateTime<Local>),
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn mk_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub fn start_terminal_events_loop(tx: &EventSender) {
    let tx = tx.clone();

    tokio::spawn(async move {
        let mut reader = EventStream::new();

        while let Some(event) = reader.next().await {
            match event {
                Ok(event) => {
                    if tx.send(Event::Terminal(event)).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("Error while reading terminal events: {:?}", e),
            }
        }
    });
}
