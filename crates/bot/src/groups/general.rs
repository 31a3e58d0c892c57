use serenity::all::Message;
use serenity::framework::standard::CommandResult;
use serenity::framework::standard::macros::{command, group};
use serenity::prelude::*;

use crate::type_map::StartedTime;

#[group]
#[commands(ping, uptime)]
pub struct General;

#[command]
async fn ping(ctx: &Context, msg: &Message) -> CommandResult {
    msg.channel_id.say(&ctx.http, "Pong!").await?;

    Ok(())
}

#[command]
#[description("Shows how long the bot has been running.")]
async fn uptime(ctx: &Context, msg: &Message) -> CommandResult {
    let started = ctx.data.read().await.get::<StartedTime>().copied();
    let Some(started) = started else {
        return Ok(());
    };
    let seconds = started.elapsed().as_secs();
    let (hours, minutes) = (seconds / 3600, seconds / 60 % 60);
    msg.channel_id.say(
        &ctx.http,
        format!("Up for {hours}h {minutes}m {}s.", seconds % 60)
    ).await?;

    Ok(())
}
