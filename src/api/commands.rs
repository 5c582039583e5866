use color_eyre::Result;
use serde::Serialize;

use crate::{
    protocols::http::{mk_post_request, ApiReply, HyperHttpClient},
    settings::Settings,
};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SingleRequest {
    pub device: String,
    pub seconds: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoopRequest {
    pub device: String,
    pub on_seconds: u64,
    pub off_seconds: u64,
    pub total_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Single(SingleRequest),
    Loop(LoopRequest),
    StopAll,
}

pub async fn post_single(
    settings: &Settings,
    client: &HyperHttpClient,
    body: &SingleRequest,
) -> Result<ApiReply> {
    let uri = settings.api_uri("/api/single")?;
    mk_post_request(client, &uri, Some(body), settings.request_timeout()).await
}

pub async fn post_loop(
    settings: &Settings,
    client: &HyperHttpClient,
    body: &LoopRequest,
) -> Result<ApiReply> {
    let uri = settings.api_uri("/api/loop")?;
    mk_post_request(client, &uri, Some(body), settings.request_timeout()).await
}

pub async fn post_stop(settings: &Settings, client: &HyperHttpClient) -> Result<ApiReply> {
    let uri = settings.api_uri("/api/stop")?;
    mk_post_request::<()>(client, &uri, None, settings.request_timeout()).await
}

pub async fn send_command(
    settings: &Settings,
    client: &HyperHttpClient,
    command: &Command,
) -> Result<ApiReply> {
    match command {
        Command::Single(body) => post_single(settings, client, body).await,
        Command::Loop(body) => post_loop(settings, client, body).await,
        Command::StopAll => post_stop(settings, client).await,
    }
}

/// Fire-and-forget, at-least-once: nothing stops a second start for a device
/// before the next poll shows it active.
#[derive(Clone)]
pub struct CommandSender {
    settings: Settings,
    client: HyperHttpClient,
}

impl CommandSender {
    pub fn new(settings: &Settings, client: &HyperHttpClient) -> Self {
        CommandSender {
            settings: settings.clone(),
            client: client.clone(),
        }
    }

    pub fn submit(&self, command: Command) {
        let settings = self.settings.clone();
        let client = self.client.clone();

        log::info!("Submitting {:?}", command);

        tokio::spawn(async move {
            match send_command(&settings, &client, &command).await {
                Ok(ApiReply { ok: Some(false), msg }) => {
                    log::warn!("{:?} refused: {}", command, msg.unwrap_or_default())
                }
                Ok(reply) => log::debug!("{:?} accepted: {:?}", command, reply),
                Err(e) => log::warn!("{:?} failed: {:?}", command, e),
            }
        });
    }

    pub fn stop_all(&self) {
        self.submit(Command::StopAll);
    }
}
