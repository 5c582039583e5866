use std::{fmt::Display, time::Duration};

use chrono::{DateTime, Local, TimeZone};

use crate::event::{Event, EventSender};

const CLOCK_TICK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ClockWidget {
    text: String,
}

impl ClockWidget {
    pub fn new() -> Self {
        ClockWidget {
            text: format_time(&Local::now()),
        }
    }

    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>)
    where
        Tz::Offset: Display,
    {
        self.text = format_time(now);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn format_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%H:%M:%S").to_string()
}

pub fn start_clock_loop(tx: &EventSender) {
    let tx = tx.clone();

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLOCK_TICK);

        loop {
            interval.tick().await;

            if tx.send(Event::Clock(Local::now())).is_err() {
                break;
            }
        }
    });
}
