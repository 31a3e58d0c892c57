//! Holds event hooks for the bot.

use std::collections::HashSet;
use serenity::all::{Message, StandardFramework, UserId};
use serenity::framework::standard::macros::hook;
use serenity::framework::standard::{CommandError, Configuration};
use serenity::prelude::*;
use tracing::{info, warn};
use crate::groups;
use crate::structures::Config;

#[hook]
async fn after(
    ctx: &Context,
    msg: &Message,
    cmd_name: &str,
    error: Result<(), CommandError>
) {
    let Err(err) = error else { return };
    warn!("command '{cmd_name}' failed: {err:?}");
    if let Err(reply_err) = msg.reply(ctx, "Something went wrong running that command.").await {
        warn!("couldn't report the failure: {reply_err}");
    }
}

#[hook]
async fn before(_ctx: &Context, msg: &Message, command_name: &str) -> bool {
    info!("Got command '{}' by user '{}'", command_name, msg.author.name);

    true // if `before` returns false, command processing doesn't happen.
}


/// Sets up the given framework for the bot.
pub fn setup_framework(config: &Config, owners: HashSet<UserId>) -> StandardFramework {
    let mut framework = StandardFramework::new()
        .after(after)
        .before(before)
        .group(&groups::general::GENERAL_GROUP)
        .group(&groups::gacha::GACHA_GROUP);
    framework.configure(
        Configuration::new()
            .with_whitespace(true)
            .prefixes(config.prefixes.iter())
            .owners(owners)
    );
    framework
}
