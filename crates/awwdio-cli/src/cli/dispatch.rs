use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use awwdio_core::{Channel, StorageBackend};

use crate::cli::actions::Action;

/// Options shared by every subcommand
#[derive(Debug, Default)]
pub struct Globals {
    pub api_url: Option<String>,
    pub storage: Option<StorageBackend>,
    pub log_file: Option<PathBuf>,
    pub verbosity: u8,
}

pub fn globals(matches: &clap::ArgMatches) -> Result<Globals> {
    let storage = matches
        .get_one::<String>("storage")
        .map(|s| s.parse::<StorageBackend>().map_err(|e| anyhow!(e)))
        .transpose()?;

    Ok(Globals {
        api_url: matches.get_one::<String>("api-url").cloned(),
        storage,
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        verbosity: matches.get_count("verbosity"),
    })
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches
        .subcommand()
        .ok_or_else(|| anyhow!("missing subcommand"))?;

    let string = |id: &str| -> Result<String> {
        sub_m
            .get_one::<String>(id)
            .cloned()
            .ok_or_else(|| anyhow!("missing required argument: {}", id))
    };
    let channel = || -> Result<Channel> { string("channel")?.parse::<Channel>().map_err(|e| anyhow!(e)) };

    Ok(match name {
        "send-otp" => Action::SendOtp {
            channel: channel()?,
            to: string("to")?,
        },
        "verify-otp" => Action::VerifyOtp {
            channel: channel()?,
            to: string("to")?,
            otp: string("otp")?,
        },
        "whoami" => Action::Whoami,
        "set-name" => Action::SetName { name: string("name")? },
        "logout" => Action::Logout,
        "get" => Action::Get { path: string("path")? },
        "post" => Action::Post {
            path: string("path")?,
            body: serde_json::from_str(&string("body")?).context("request body must be valid JSON")?,
        },
        "video-token" => Action::VideoToken { room: string("room")? },
        "room" => Action::Room { name: string("name")? },
        "theme" => Action::Theme {
            tailwind: sub_m.get_flag("tailwind"),
        },
        "config" => Action::Config {
            save: sub_m.get_flag("save"),
        },
        other => return Err(anyhow!("unknown subcommand: {}", other)),
    })
}
