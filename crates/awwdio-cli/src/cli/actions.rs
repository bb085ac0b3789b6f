use anyhow::{Context, Result};
use awwdio_core::api::VerifyOtpResponse;
use awwdio_core::{theme, ApiResponse, AppContext, AuthStore, Channel, Config, User};
use serde_json::Value;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendOtp { channel: Channel, to: String },
    VerifyOtp { channel: Channel, to: String, otp: String },
    Whoami,
    SetName { name: String },
    Logout,
    Get { path: String },
    Post { path: String, body: Value },
    VideoToken { room: String },
    Room { name: String },
    Theme { tailwind: bool },
    Config { save: bool },
}

/// Print a response as JSON and fail if it carries an error.
fn report<T: serde::Serialize>(response: ApiResponse<T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    response.into_result()?;
    Ok(())
}

/// The user a verification signed in, if the server issued a session.
fn signed_in_user(response: &ApiResponse<VerifyOtpResponse>, store: &AuthStore) -> Option<User> {
    let issued = response.data().is_some_and(|data| data.success && data.token.is_some());
    store.current_user().filter(|_| issued)
}

pub fn theme(tailwind: bool) -> Result<()> {
    let tokens = if tailwind {
        theme::tailwind_config()
    } else {
        theme::tokens_json()
    };
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

pub fn config(config: &Config, save: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if save {
        config.save().context("Failed to save configuration")?;
        println!("Saved to {}", Config::config_path()?.display());
    }
    Ok(())
}

pub async fn run(action: Action, ctx: &AppContext) -> Result<()> {
    match action {
        Action::SendOtp { channel, to } => {
            report(ctx.api.send_otp(channel, &to).await)?;
            println!("Code sent via {}. Run `awwdio verify-otp --channel {} --to {} --otp <code>`.", channel, channel, to);
        }
        Action::VerifyOtp { channel, to, otp } => {
            let response = ctx.api.verify_otp(channel, &to, &otp).await;
            let signed_in = signed_in_user(&response, &ctx.store);
            report(response)?;
            match signed_in {
                Some(user) => println!("Signed in as {}", user.label()),
                None => println!("Code accepted, but the server did not issue a session"),
            }
        }
        Action::Whoami => match ctx.store.current_user() {
            Some(user) => {
                println!("{} ({}: {})", user.label(), user.channel, user.contact);
                if user.token.is_none() {
                    println!("No session token stored");
                }
            }
            None => println!("Not signed in"),
        },
        Action::SetName { name } => {
            if !ctx.store.is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            ctx.store
                .update_display_name(name.as_str())
                .context("Display name changed but could not be saved")?;
            println!("Display name set to {}", name);
        }
        Action::Logout => {
            ctx.store.logout().context("Failed to remove stored session")?;
            info!("Session cleared");
            println!("Signed out");
        }
        Action::Get { path } => {
            report(ctx.api.get::<Value>(&path).await)?;
        }
        Action::Post { path, body } => {
            report(ctx.api.post::<Value, _>(&path, &body).await)?;
        }
        Action::VideoToken { room } => {
            report(ctx.api.video_token(&room).await)?;
        }
        Action::Room { name } => {
            report(ctx.api.room(&name).await)?;
        }
        Action::Theme { tailwind } => theme(tailwind)?,
        Action::Config { save } => config(&ctx.config, save)?,
    }
    Ok(())
}
