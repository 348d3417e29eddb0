//! Console command parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenKind {
    Users,
    CustomerGroups,
    VehicleGroups,
    GeofenceGroups,
    Alarms,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 5] = [
        ScreenKind::Users,
        ScreenKind::CustomerGroups,
        ScreenKind::VehicleGroups,
        ScreenKind::GeofenceGroups,
        ScreenKind::Alarms,
    ];

    /// Command that switches to this screen.
    pub fn command(&self) -> &'static str {
        match self {
            ScreenKind::Users => "users",
            ScreenKind::CustomerGroups => "customer-groups",
            ScreenKind::VehicleGroups => "vehicle-groups",
            ScreenKind::GeofenceGroups => "geofence-groups",
            ScreenKind::Alarms => "alarms",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreenKind::Users => "Users",
            ScreenKind::CustomerGroups => "Customer groups",
            ScreenKind::VehicleGroups => "Vehicle groups",
            ScreenKind::GeofenceGroups => "Geofence groups",
            ScreenKind::Alarms => "Alarms",
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Switch(ScreenKind),
    Refresh,
    Search(String),
    Sort(String),
    Page(usize),
    Next,
    Prev,
    Expand(i64),
    New,
    Edit(i64),
    Set { field: String, value: String },
    Add { field: String, value: String },
    Remove { field: String, value: String },
    Save,
    Reset,
    Close,
    Delete(i64),
    Confirm,
    Cancel,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type 'help' for the command list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidNumber(value.to_string()))
}

/// Splits `field value...` into the field name and the rest of the line.
fn field_and_value(rest: &str, usage: &'static str) -> Result<(String, String), CommandError> {
    let rest = rest.trim_start();
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    if field.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok((field.to_string(), value.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        if let Some(kind) = ScreenKind::ALL
            .into_iter()
            .find(|k| k.command().eq_ignore_ascii_case(name))
        {
            return Ok(Command::Switch(kind));
        }

        let command = match name.to_lowercase().as_str() {
            "refresh" => Command::Refresh,
            // An empty search clears the filter.
            "search" => Command::Search(rest.to_string()),
            "sort" if rest.is_empty() => return Err(CommandError::Usage("sort <column>")),
            "sort" => Command::Sort(rest.to_string()),
            "page" if rest.is_empty() => return Err(CommandError::Usage("page <n>")),
            "page" => Command::Page(parse_number(rest)?),
            "next" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "expand" if rest.is_empty() => return Err(CommandError::Usage("expand <id>")),
            "expand" => Command::Expand(parse_number(rest)?),
            "new" => Command::New,
            "edit" if rest.is_empty() => return Err(CommandError::Usage("edit <id>")),
            "edit" => Command::Edit(parse_number(rest)?),
            "set" => {
                let (field, value) = field_and_value(rest, "set <field> <value>")?;
                Command::Set { field, value }
            }
            "add" => {
                let (field, value) = field_and_value(rest, "add <field> <value>")?;
                if value.is_empty() {
                    return Err(CommandError::Usage("add <field> <value>"));
                }
                Command::Add { field, value }
            }
            "remove" => {
                let (field, value) = field_and_value(rest, "remove <field> <value>")?;
                if value.is_empty() {
                    return Err(CommandError::Usage("remove <field> <value>"));
                }
                Command::Remove { field, value }
            }
            "save" => Command::Save,
            "reset" => Command::Reset,
            "close" => Command::Close,
            "delete" if rest.is_empty() => return Err(CommandError::Usage("delete <id>")),
            "delete" => Command::Delete(parse_number(rest)?),
            "confirm" | "yes" => Command::Confirm,
            "cancel" | "no" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };
        Ok(command)
    }
}

pub const HELP: &str = "\
Screens:  users | customer-groups | vehicle-groups | geofence-groups | alarms
Table:    refresh | search <text> | sort <column> | page <n> | next | prev | expand <id>
Drawer:   new | edit <id> | set <field> <value> | add <field> <value>
          remove <field> <value> | save | reset | close
Delete:   delete <id> | confirm | cancel
Other:    help | quit";
