//! Discord gateway for the Pleb Chat bridge.
//!
//! Wraps a serenity client and forwards every channel message to a
//! registered [`EventSink`] as a transport-neutral [`ChannelEvent`]. No
//! filtering happens here: provenance and channel checks belong to the
//! consumer, which receives events in the platform's own delivery order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context as _;
use serenity::all::{Client, Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

mod event;

pub use event::{ChannelEvent, EventAttachment, EventSink};

/// Gateway connection settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
}

/// Cloneable connection flag, set while the gateway session is ready.
///
/// Defaults to disconnected, so a process running without the gateway
/// reports an honest status.
#[derive(Clone, Default)]
pub struct ConnectionStatus(Arc<AtomicBool>);

impl ConnectionStatus {
    pub fn connected(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::Relaxed);
    }
}

/// Long-lived Discord subscription.
pub struct DiscordGateway {
    config: DiscordConfig,
    status: ConnectionStatus,
}

impl DiscordGateway {
    pub fn new(config: DiscordConfig, status: ConnectionStatus) -> Self {
        Self { config, status }
    }

    /// Run the subscription until `shutdown` fires or the client exits.
    ///
    /// Blocks for the lifetime of the session. On cancellation the shard
    /// manager is shut down, which lets `Client::start` return cleanly.
    pub async fn run(
        self,
        sink: Arc<dyn EventSink>,
        shutdown: CancellationToken,
    ) -> anyhow::Result<()> {
        let intents =
            GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

        let handler = Handler {
            sink,
            status: self.status.clone(),
        };
        let mut client = Client::builder(&self.config.token, intents)
            .event_handler(handler)
            .await
            .context("failed to build Discord client")?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            info!("Stopping Discord gateway");
            shard_manager.shutdown_all().await;
        });

        let result = client.start().await;
        self.status.set(false);
        result.context("Discord client error")
    }
}

struct Handler {
    sink: Arc<dyn EventSink>,
    status: ConnectionStatus,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        self.status.set(true);
        info!(user = %ready.user.name, "Discord bot logged in");
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        debug!(
            channel = msg.channel_id.get(),
            author = %msg.author.name,
            "Channel message received"
        );
        self.sink.deliver(channel_event(&msg)).await;
    }
}

/// Map a serenity message to the transport-neutral event shape.
///
/// Author name prefers the display name over the account name, matching
/// how the platform renders the message.
fn channel_event(msg: &Message) -> ChannelEvent {
    ChannelEvent {
        author_is_bridge: msg.author.bot,
        channel_id: msg.channel_id.get(),
        author_name: msg
            .author
            .global_name
            .as_deref()
            .unwrap_or(&msg.author.name)
            .to_string(),
        author_avatar: msg.author.face(),
        content: msg.content.clone(),
        attachments: msg
            .attachments
            .iter()
            .map(|attachment| EventAttachment {
                url: attachment.url.clone(),
                content_type: attachment.content_type.clone(),
            })
            .collect(),
    }
}
