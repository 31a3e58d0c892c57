use std::fmt::Write;
use std::sync::Arc;
use serenity::all::{CreateAttachment, CreateMessage, Message};
use serenity::framework::standard::{Args, CommandResult};
use serenity::framework::standard::macros::{command, group};
use serenity::prelude::*;
use skyroll::banner::Banner;
use skyroll::banner::structures::{DrawTable, Item, Rarity};
use skyroll::parser::{self, RollCommand};
use skyroll::renderer::{self, Layout};
use skyroll::roll::{resolve_target, DrawRequest, RngSource, RollError};
use skyroll::summary::{fit_message, Report, MESSAGE_LIMIT};
use tracing::warn;

use crate::type_map::{BotConfig, CurrentBanner, IconCache};

/// The most tiles drawn in a roll's image.
const RENDER_LIMIT: usize = 100;

#[group]
#[commands(roll, banner)]
pub struct Gacha;

/// Gets the current banner snapshot, if one has loaded.
async fn current_banner(ctx: &Context) -> Option<Arc<Banner>> {
    ctx.data.read().await.get::<CurrentBanner>().cloned()
}

/// Runs a roll command against a banner.
fn simulate(banner: &Banner, command: &RollCommand) -> Result<Report<'_>, RollError> {
    let request = match command {
        RollCommand::Budget(budget) => budget.into_request()?,
        RollCommand::Until(name) => DrawRequest::until(resolve_target(banner, name)?),
    };
    let mut source = RngSource(rand::thread_rng());
    Ok(Report::new(skyroll::roll::roll(banner, &request, &mut source)))
}

/// Draws the first few items of a report as a PNG.
///
/// Rendering runs on the blocking pool, since it opens icons and encodes the image.
async fn render_report(ctx: &Context, report: &Report<'_>) -> Option<Vec<u8>> {
    let (icons, cache) = {
        let data = ctx.data.read().await;
        (
            data.get::<BotConfig>().and_then(|config| config.icon_path.clone()),
            data.get::<IconCache>().cloned()
        )
    };
    let cache = cache?;
    let shown = report.items.iter()
        .take(RENDER_LIMIT)
        .map(|&item| item.clone())
        .collect::<Vec<Item>>();
    let target = report.target.cloned();
    let rendered = tokio::task::spawn_blocking(move || {
        let shown = shown.iter().collect::<Vec<&Item>>();
        let mut cache = cache.blocking_lock();
        renderer::render(
            &shown, target.as_ref(), icons.as_deref(), Some(&mut *cache), Layout::default()
        ).and_then(renderer::encode_png)
    }).await;
    match rendered {
        Ok(Ok(png)) => Some(png),
        Ok(Err(err)) => {
            warn!("failed to render a roll: {err}");
            None
        }
        Err(err) => {
            warn!("rendering task failed: {err}");
            None
        }
    }
}

/// Replies to a message, cutting the reply down to fit in one message.
async fn reply(ctx: &Context, msg: &Message, content: &str) -> serenity::Result<Message> {
    msg.reply(ctx, fit_message(content, MESSAGE_LIMIT)).await
}

#[command]
#[description("Simulates rolling on the current banner.")]
#[usage("<amount> <singles|tenparts|crystals>... | spark | until <item>")]
#[example("10 singles, 3000 crystals and 2 tenparts")]
async fn roll(ctx: &Context, msg: &Message, args: Args) -> CommandResult {
    let text = args.rest();
    if text.trim().is_empty() {
        reply(ctx, msg, "Roll what? Try `roll 3000 crystals`, `roll spark`, or `roll until <item>`.").await?;
        return Ok(());
    }
    let command = match parser::parse(text) {
        Ok(command) => command,
        Err(err) => {
            reply(ctx, msg, &format!("```\n{}\n```", parser::describe(&err))).await?;
            return Ok(());
        }
    };
    let Some(banner) = current_banner(ctx).await else {
        reply(ctx, msg, &RollError::Unavailable.to_string()).await?;
        return Ok(());
    };
    let report = match simulate(&banner, &command) {
        Ok(report) => report,
        Err(err) => {
            reply(ctx, msg, &err.to_string()).await?;
            return Ok(());
        }
    };
    let mut message = CreateMessage::new()
        .content(fit_message(&report.to_string(), MESSAGE_LIMIT))
        .reference_message(msg);
    if let Some(png) = render_report(ctx, &report).await {
        message = message.add_file(CreateAttachment::bytes(png, "roll.png"));
    }
    msg.channel_id.send_message(&ctx.http, message).await?;

    Ok(())
}

#[command]
#[description("Shows what's on the current banner.")]
async fn banner(ctx: &Context, msg: &Message) -> CommandResult {
    let Some(banner) = current_banner(ctx).await else {
        reply(ctx, msg, &RollError::Unavailable.to_string()).await?;
        return Ok(());
    };
    let mut content = String::from("**Featured**\n");
    for item in banner.featured() {
        write!(content, "- [{}] {}", item.rarity, item.name)?;
        if let Some(character) = &item.character {
            write!(content, " ({character})")?;
        }
        writeln!(content, ": {:.3}%", item.rate1)?;
    }
    writeln!(
        content,
        "SS Rare rate: {:.3}% ({:.3}% on the tenth draw of a ten-part)",
        banner.rarity_rate(Rarity::SSRare, DrawTable::Normal),
        banner.rarity_rate(Rarity::SSRare, DrawTable::Guaranteed)
    )?;
    writeln!(
        content,
        "Featured rate: {:.3}%, {} items in total",
        banner.featured_rate(DrawTable::Normal),
        banner.items().len()
    )?;
    reply(ctx, msg, &content).await?;

    Ok(())
}
