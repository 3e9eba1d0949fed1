/// Leading character that turns a post body into a command.
pub const COMMAND_MARKER: char = '/';

/// Administrative commands that can be typed into the message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/del <id> [id...]`. Holds the ids that parsed; it may be empty.
    Delete(Vec<i64>),
}

/// How a submitted body should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Command(Command),
    /// Plain text to store as a post, including slash text naming no known command.
    Literal,
}

impl Invocation {
    pub fn parse(body: &str) -> Self {
        let Some(rest) = body.strip_prefix(COMMAND_MARKER) else {
            return Self::Literal;
        };

        let mut parts = rest.split(' ');
        let name = parts.next().unwrap_or_default();

        match name {
            "del" => Self::Command(Command::Delete(parse_ids(parts))),
            _ => Self::Literal,
        }
    }
}

/// Keep only tokens written as plain decimal digits; everything else is dropped.
fn parse_ids<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<i64> {
    let mut ids: Vec<i64> = tokens
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|t| t.parse().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
