use crate::input::{parse_button, Buttons};
use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCommand {
    Power,
    Home,
    HomeLong,
    /// Raw host message code.
    Message(u32),
    Key(Buttons),
    Notify(String),
    Quit,
}

/// Parse one stdin line. Arguments follow shell quoting rules, so
/// `notify "two words"` carries a single argument.
pub fn parse_command(line: &str) -> Result<DesktopCommand> {
    let parts = shlex::split(line).ok_or_else(|| anyhow!("unbalanced quotes"))?;
    let Some((name, args)) = parts.split_first() else {
        bail!("empty command");
    };
    let command = match (name.to_ascii_lowercase().as_str(), args) {
        ("power", []) => DesktopCommand::Power,
        ("home", []) => DesktopCommand::Home,
        ("home-long", []) => DesktopCommand::HomeLong,
        ("quit" | "exit", []) => DesktopCommand::Quit,
        ("msg", [code]) => DesktopCommand::Message(parse_code(code)?),
        ("key", [button]) => DesktopCommand::Key(
            parse_button(button).ok_or_else(|| anyhow!("unknown button '{button}'"))?,
        ),
        ("notify", words) if !words.is_empty() => DesktopCommand::Notify(words.join(" ")),
        (other, _) => bail!("unknown command '{other}'"),
    };
    Ok(command)
}

fn parse_code(s: &str) -> Result<u32> {
    let code = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16)?,
        None => s.parse()?,
    };
    Ok(code)
}
