use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("wordhoard")
        .about("Personal lexicon service")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("WORDHOARD_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("admin-secret")
                .short('s')
                .long("admin-secret")
                .help("Administrator secret gating all mutating operations")
                .env("WORDHOARD_ADMIN_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("session-backend")
                .long("session-backend")
                .help("Session design: stateless (signed tokens, non-revocable) or stateful (in-memory, revocable)")
                .default_value("stateless")
                .env("WORDHOARD_SESSION_BACKEND")
                .value_parser(["stateless", "stateful"]),
        )
        .arg(
            Arg::new("session-ttl")
                .long("session-ttl")
                .help("Session lifetime in seconds (cookie Max-Age, and record TTL for the stateful backend)")
                .default_value("604800")
                .env("WORDHOARD_SESSION_TTL")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("insecure-cookie")
                .long("insecure-cookie")
                .help("Omit the Secure attribute on the session cookie, for plain-HTTP local use")
                .env("WORDHOARD_INSECURE_COOKIE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("WORDHOARD_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
