use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

fn channel_arg() -> Arg {
    Arg::new("channel")
        .short('c')
        .long("channel")
        .help("Where the one-time password is delivered")
        .value_parser(["email", "sms"])
        .default_value("email")
}

fn contact_arg() -> Arg {
    Arg::new("to")
        .long("to")
        .help("Email address or phone number")
        .required(true)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("awwdio")
        .about("Terminal client for awwdio")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the awwdio API, example: https://awwdio.example/api")
                .global(true),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .help("Where the session is kept between runs")
                .value_parser(["file", "keyring", "memory"])
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write logs to this file instead of stderr")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("send-otp")
                .about("Send a one-time password")
                .arg(channel_arg())
                .arg(contact_arg()),
        )
        .subcommand(
            Command::new("verify-otp")
                .about("Verify a one-time password and sign in")
                .arg(channel_arg())
                .arg(contact_arg())
                .arg(
                    Arg::new("otp")
                        .long("otp")
                        .help("The code that was received")
                        .required(true),
                ),
        )
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("set-name")
                .about("Change the display name of the signed-in user")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("logout").about("Sign out and forget the stored session"))
        .subcommand(
            Command::new("get")
                .about("Send an authenticated GET request")
                .arg(Arg::new("path").help("Path under the API base URL, or a full URL").required(true)),
        )
        .subcommand(
            Command::new("post")
                .about("Send an authenticated POST request with a JSON body")
                .arg(Arg::new("path").help("Path under the API base URL, or a full URL").required(true))
                .arg(Arg::new("body").help("JSON request body").default_value("{}")),
        )
        .subcommand(
            Command::new("video-token")
                .about("Get an access token for a video room")
                .arg(Arg::new("room").required(true)),
        )
        .subcommand(
            Command::new("room")
                .about("Show the details of a video room")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(
            Command::new("theme")
                .about("Print the design tokens")
                .arg(
                    Arg::new("tailwind")
                        .long("tailwind")
                        .help("Print a full tailwind configuration")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration")
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Write it to the config file, including any --api-url or --storage override")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        new().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let matches = new()
            .try_get_matches_from(["awwdio", "whoami", "--storage", "memory", "-vv"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("storage").map(String::as_str), Some("memory"));
        assert_eq!(matches.get_count("verbosity"), 2);
    }

    #[test]
    fn test_verify_otp_requires_code() {
        assert!(new()
            .try_get_matches_from(["awwdio", "verify-otp", "--to", "ada@example.com"])
            .is_err());
    }
}
