use api::commands::CommandSender;
use clock::start_clock_loop;
use color_eyre::Result;
use event::{mk_event_channel, start_terminal_events_loop};
use panel::registry::Registry;
use polling::start_status_poll_loop;
use protocols::http::mk_hyper_http_client;
use tui::app::App;

use crate::settings::read_settings;

mod api;
mod clock;
mod event;
mod panel;
mod polling;
mod protocols;
mod settings;
mod tui;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let settings = read_settings()?;
    let http_client = mk_hyper_http_client();

    let registry = Registry::from_settings(&settings);
    let commands = CommandSender::new(&settings, &http_client);

    log::info!(
        "Controlling {} device(s) via {}",
        registry.len(),
        settings.server.url
    );

    let terminal = ratatui::init();
    let (tx, rx) = mk_event_channel();

    start_terminal_events_loop(&tx);
    start_clock_loop(&tx);
    start_status_poll_loop(&settings, &http_client, &tx);

    let result = App::new(registry, commands).run(terminal, rx).await;
    ratatui::restore();

    result
}
