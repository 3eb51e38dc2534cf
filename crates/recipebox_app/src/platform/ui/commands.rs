//! Terminal input parsing. One line becomes one `Command`.
use recipebox_core::{EditSection, Msg, RecipeId};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  list                       reload the recipe list
  name <text> / site <text>  filter by name / by site (no text clears)
  reset                      clear both filters
  add <url>                  add a recipe from a page
  dismiss                    close the add-recipe error
  open <id>                  show a recipe
  back                       return to the list
  edit <section>             start editing ingredients or instructions
  set <section>[:<slot>] <text>
                             replace draft text; \\n starts a new line
  save <section>             send the draft to the server
  cancel <section>           throw the draft away
  delete                     delete the open recipe (asks first)
  yes / no                   answer the delete question
  ok                         acknowledge a notice
  config                     write the current configuration file
  help                       show this text
  quit                       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    SaveConfig,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a recipe id")]
    BadId(String),
    #[error("unknown section '{0}' (ingredients or instructions)")]
    BadSection(String),
    #[error("'{0}' is not a slot number")]
    BadSlot(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" => dispatch(Msg::ListOpened),
        "name" => dispatch(Msg::NameFilterChanged(rest.to_string())),
        "site" => dispatch(Msg::SiteFilterChanged(rest.to_string())),
        "reset" => dispatch(Msg::FiltersReset),
        "add" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("add"));
            }
            Command::Dispatch(vec![
                Msg::UrlInputChanged(rest.to_string()),
                Msg::SubmitClicked,
            ])
        }
        "dismiss" => dispatch(Msg::SubmissionErrorDismissed),
        "open" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            let id = rest
                .parse::<u64>()
                .map_err(|_| CommandError::BadId(rest.to_string()))?;
            dispatch(Msg::RecipeOpened(RecipeId(id)))
        }
        "back" => dispatch(Msg::DetailClosed),
        "edit" => dispatch(Msg::EditStarted(parse_section(rest, "edit")?)),
        "save" => dispatch(Msg::EditSaved(parse_section(rest, "save")?)),
        "cancel" => dispatch(Msg::EditCancelled(parse_section(rest, "cancel")?)),
        "set" => parse_set(rest)?,
        "delete" => dispatch(Msg::DeleteClicked),
        "yes" | "y" => dispatch(Msg::DeleteConfirmed),
        "no" | "n" => dispatch(Msg::DeleteDeclined),
        "ok" => dispatch(Msg::NoticeDismissed),
        "config" => Command::SaveConfig,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn dispatch(msg: Msg) -> Command {
    Command::Dispatch(vec![msg])
}

fn parse_section(word: &str, command: &'static str) -> Result<EditSection, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::MissingArgument(command)),
        "ingredients" | "ing" => Ok(EditSection::Ingredients),
        "instructions" | "ins" => Ok(EditSection::Instructions),
        other => Err(CommandError::BadSection(other.to_string())),
    }
}

/// `set <section>[:<slot>] <text>`; the text may be empty to clear a slot.
fn parse_set(rest: &str) -> Result<Command, CommandError> {
    let (target, text) = match rest.split_once(char::is_whitespace) {
        Some((target, text)) => (target, text.trim()),
        None => (rest, ""),
    };
    let (section, slot) = match target.split_once(':') {
        Some((section, slot)) => {
            let slot = slot
                .parse::<usize>()
                .map_err(|_| CommandError::BadSlot(slot.to_string()))?;
            (section, slot)
        }
        None => (target, 0),
    };
    let section = parse_section(section, "set")?;
    Ok(dispatch(Msg::DraftEdited {
        section,
        slot,
        text: unescape_newlines(text),
    }))
}

fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
