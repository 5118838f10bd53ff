#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgGroup;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::encode_text;
use crate::domain::models::Command as SerialCommand;
use crate::domain::services::help_text;
use crate::domain::services::SerialChannel;
use crate::domain::services::Sessions;
use crate::domain::services::Snapshot;
use crate::infrastructure::serial::ConnectorManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_session(snapshot: &Snapshot) -> String {
    let state = &snapshot.state;
    let watering = if state.is_watering() { "on" } else { "off" };
    let mut res = format!(
        "- (ID: {}) {}, Threshold: {}%, Interval: {} min, Watering: {watering}",
        snapshot.id,
        snapshot.timestamp,
        state.threshold(),
        state.interval(),
    );

    if !snapshot.port.is_empty() {
        res = format!("{res}, Port: {}", snapshot.port);
    }

    if let Some(sample) = state.latest() {
        res = format!("{res}, Last: {}% at {} min", sample.percentage, sample.time);
    }

    return res;
}

async fn print_sessions_list() -> Result<()> {
    let mut sessions = Sessions::default()
        .list()
        .await?
        .iter()
        .map(format_session)
        .collect::<Vec<String>>();

    sessions.reverse();

    if sessions.is_empty() {
        println!("There are no sessions available. You should start your first one!");
    } else {
        println!("{}", sessions.join("\n"));
    }

    return Ok(());
}

fn print_ports() -> Result<()> {
    let ports = ConnectorManager::available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found. Is the board plugged in?");
    } else {
        println!("{}", ports.join("\n"));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Builds the command for `waterline send`. The payload takes the same
/// escapes as the console.
pub fn serial_command_from_args(tag: &str, payload: Option<&String>) -> Result<SerialCommand> {
    let mut chars = tag.chars();
    let tag_char = match (chars.next(), chars.next()) {
        (Some(tag_char), None) => tag_char,
        _ => bail!(format!("Tag must be a single character, got '{tag}'")),
    };

    let payload = match payload {
        Some(payload) => Some(encode_text(payload)?),
        None => None,
    };

    return Ok(SerialCommand::from_parts(tag_char, payload.as_deref())?);
}

fn send_once(send_matches: &ArgMatches) -> Result<()> {
    let port = Config::get(ConfigKey::Port);
    if port.is_empty() {
        bail!("No serial port set. Pass --port or set `port` in the config file.");
    }

    let tag = send_matches
        .get_one::<String>("tag")
        .map(|e| return e.as_str())
        .unwrap_or_default();
    let command = serial_command_from_args(tag, send_matches.get_one::<String>("payload"))?;

    let mut channel = SerialChannel::new(ConnectorManager::get(), Config::channel_settings()?);
    channel.connect(&port)?;
    let written = channel.send(command.tag.as_char(), command.payload.as_deref())?;
    channel.close();

    let expected = command.payload_len() + 1;
    if written < expected {
        println!(
            "{}",
            Paint::yellow(format!(
                "Sent {command} to {port}, but only {written} of {expected} bytes were written"
            ))
        );
    } else {
        println!("Sent {command} to {port} ({written} bytes)");
    }

    return Ok(());
}

async fn load_config_from_session(session_id: &str) -> Result<()> {
    let snapshot = Sessions::default().load(session_id).await?;
    Config::set(ConfigKey::SessionID, session_id);
    if Config::get(ConfigKey::Port).is_empty() && !snapshot.port.is_empty() {
        Config::set(ConfigKey::Port, &snapshot.port);
    }

    return Ok(());
}

async fn load_config_from_session_interactive() -> Result<bool> {
    let mut sessions = Sessions::default().list().await?;
    sessions.reverse();

    if sessions.is_empty() {
        println!("There are no sessions available. You should start your first one!");
        return Ok(false);
    }

    let session_options = sessions.iter().map(format_session).collect::<Vec<String>>();

    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which session would you like to load?")
        .default(0)
        .items(&session_options)
        .interact_opt()?;

    match idx {
        Some(idx) => {
            load_config_from_session(&sessions[idx].id).await?;
            return Ok(true);
        }
        None => return Ok(false),
    }
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Waterline")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Waterline with environment variable RUST_LOG=waterline")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_send() -> Command {
    return Command::new("send")
        .about("Send a single command to the board and exit.")
        .arg(
            Arg::new("tag")
                .help("Command tag. `s` starts a transmission, `a` sends data.")
                .required(true),
        )
        .arg(
            Arg::new("payload")
                .help("Payload for `a`. Use \\xNN for raw bytes and \\\\ for a backslash.")
                .required(false),
        );
}

fn subcommand_sessions_delete() -> Command {
    return Command::new("delete")
        .about("Delete one or all sessions.")
        .arg(
            clap::Arg::new("session-id")
                .short('i')
                .long("id")
                .help("Session ID")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("all")
                .long("all")
                .help("Delete all sessions.")
                .action(ArgAction::SetTrue),
        )
        .group(
            ArgGroup::new("delete-args")
                .args(["session-id", "all"])
                .required(true),
        );
}

fn subcommand_sessions() -> Command {
    return Command::new("sessions")
        .about("Manage past watering sessions.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the sessions cache directory path."))
        .subcommand(Command::new("list").about("List all previous sessions with their ids and latest reading."))
        .subcommand(
            Command::new("open")
                .about("Open a previous session by ID. Omit passing any session ID to load an interactive selection.")
                .arg(
                    clap::Arg::new(ConfigKey::SessionID.to_string())
                        .short('i')
                        .long("id")
                        .help("Session ID")
                        .required(false),
                ),
        )
        .subcommand(subcommand_sessions_delete());
}

fn arg_port() -> Arg {
    return Arg::new(ConfigKey::Port.to_string())
        .short('p')
        .long(ConfigKey::Port.to_string())
        .env("WATERLINE_PORT")
        .num_args(1)
        .help("Serial port the watering board is attached to, such as /dev/ttyUSB0 or COM3. Connected on startup when set.")
        .global(true);
}

fn arg_baud_rate() -> Arg {
    return Arg::new(ConfigKey::BaudRate.to_string())
        .long(ConfigKey::BaudRate.to_string())
        .env("WATERLINE_BAUD_RATE")
        .num_args(1)
        .help(format!(
            "Serial baud rate. [default: {}]",
            Config::default(ConfigKey::BaudRate)
        ))
        .global(true);
}

fn arg_timeout() -> Arg {
    return Arg::new(ConfigKey::Timeout.to_string())
        .long(ConfigKey::Timeout.to_string())
        .env("WATERLINE_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Seconds to wait on a single serial write before giving up. [default: {}]",
            Config::default(ConfigKey::Timeout)
        ))
        .global(true);
}

fn arg_threshold() -> Arg {
    return Arg::new(ConfigKey::Threshold.to_string())
        .long(ConfigKey::Threshold.to_string())
        .env("WATERLINE_THRESHOLD")
        .num_args(1)
        .help(format!(
            "Initial moisture threshold in percent, 0 to 100. [default: {}]",
            Config::default(ConfigKey::Threshold)
        ))
        .global(true);
}

fn arg_interval() -> Arg {
    return Arg::new(ConfigKey::Interval.to_string())
        .long(ConfigKey::Interval.to_string())
        .env("WATERLINE_INTERVAL")
        .num_args(1)
        .help(format!(
            "Initial measurement interval in minutes. [default: {}]",
            Config::default(ConfigKey::Interval)
        ))
        .global(true);
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("WATERLINE_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CONSOLE {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("waterline")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("monitor").about("Open the watering console. This is the default."))
        .subcommand(subcommand_send())
        .subcommand(Command::new("ports").about("List serial ports available on this machine."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_sessions())
        .arg(arg_port())
        .arg(arg_baud_rate())
        .arg(arg_timeout())
        .arg(arg_threshold())
        .arg(arg_interval())
        .arg(arg_config_file());
}

/// Handles the command line. Returns true when the console should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", crate::log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("monitor", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("send", send_matches)) => {
            Config::load(vec![&matches, send_matches]).await?;
            send_once(send_matches)?;
            return Ok(false);
        }
        Some(("ports", _)) => {
            print_ports()?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("sessions", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("dir", _)) => {
                let dir = Sessions::default().cache_dir.to_string_lossy().to_string();
                println!("{dir}");
                return Ok(false);
            }
            Some(("list", _)) => {
                print_sessions_list().await?;
                return Ok(false);
            }
            Some(("open", open_matches)) => {
                Config::load(vec![&matches, subcmd_matches, open_matches]).await?;
                if let Some(session_id) =
                    open_matches.get_one::<String>(&ConfigKey::SessionID.to_string())
                {
                    load_config_from_session(session_id).await?;
                } else if !load_config_from_session_interactive().await? {
                    return Ok(false);
                }
            }
            Some(("delete", delete_matches)) => {
                if let Some(session_id) = delete_matches.get_one::<String>("session-id") {
                    Sessions::default().delete(session_id).await?;
                    println!("Deleted session {session_id}");
                } else if delete_matches.get_flag("all") {
                    Sessions::default().delete_all().await?;
                    println!("Deleted all sessions");
                } else {
                    subcommand_sessions_delete().print_long_help()?;
                }
                return Ok(false);
            }
            _ => {
                subcommand_sessions().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
