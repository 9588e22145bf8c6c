use aura_core::{JobId, Preferences, RatingError, Stars};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  q <text>          edit the search query (debounced)
  go                search now with the current query
  results           show the latest search results
  load              load your current batch (or recent jobs)
  new               request a fresh batch
  jobs              show the dashboard with ratings
  rate <id> <1-5>   rate a job
  review            show jobs rated 4 stars or more
  toggle <id>       select/unselect an eligible job
  apps              show jobs selected for applications
  job <id>          show job details
  prefs             show saved preferences
  prefs set <field> <value>
                    update one preference; lists are comma separated,
                    numbers accept `none` (fields: roles, locations,
                    industries, min_salary, remote_weight)
  health            check the API
  help              show this help
  quit              exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Query(String),
    Search,
    Results,
    Load,
    NewBatch,
    Dashboard,
    Rate { job_id: JobId, stars: Stars },
    Review,
    Toggle(JobId),
    Applications,
    JobDetail(JobId),
    Preferences,
    SetPreference(PreferenceEdit),
    Health,
    Help,
    Quit,
}

/// One field change applied to the saved preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceEdit {
    Roles(Vec<String>),
    Locations(Vec<String>),
    Industries(Vec<String>),
    MinSalary(Option<f64>),
    RemoteWeight(Option<f64>),
}

impl PreferenceEdit {
    pub fn apply(self, preferences: &mut Preferences) {
        match self {
            PreferenceEdit::Roles(roles) => preferences.roles = roles,
            PreferenceEdit::Locations(locations) => preferences.locations = locations,
            PreferenceEdit::Industries(industries) => preferences.industries = industries,
            PreferenceEdit::MinSalary(min) => preferences.min_salary = min,
            PreferenceEdit::RemoteWeight(weight) => preferences.remote_weight = weight,
        }
    }
}

const PREFS_SET_USAGE: &str = "prefs set <roles|locations|industries|min_salary|remote_weight> <value>";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Rating(#[from] RatingError),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (word, rest) = split_word(trimmed);

    let command = match word.to_ascii_lowercase().as_str() {
        // The query keeps its inner spacing; trimming is the search client's call.
        "q" | "query" => Command::Query(rest.to_string()),
        "go" | "search" => Command::Search,
        "results" => Command::Results,
        "load" => Command::Load,
        "new" => Command::NewBatch,
        "jobs" | "dashboard" => Command::Dashboard,
        "rate" => {
            let mut args = rest.split_whitespace();
            let (Some(id), Some(stars), None) = (args.next(), args.next(), args.next()) else {
                return Err(CommandError::Usage("rate <id> <1-5>"));
            };
            let job_id = parse_id(id, "rate <id> <1-5>")?;
            let stars = stars
                .parse::<u8>()
                .map_err(|_| CommandError::Usage("rate <id> <1-5>"))?;
            Command::Rate {
                job_id,
                stars: Stars::new(stars)?,
            }
        }
        "review" => Command::Review,
        "toggle" => Command::Toggle(parse_id(rest.trim(), "toggle <id>")?),
        "apps" | "applications" => Command::Applications,
        "job" => Command::JobDetail(parse_id(rest.trim(), "job <id>")?),
        "prefs" | "preferences" => match rest.trim() {
            "" => Command::Preferences,
            args => Command::SetPreference(parse_preference_edit(args)?),
        },
        "health" => Command::Health,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_preference_edit(args: &str) -> Result<PreferenceEdit, CommandError> {
    let (verb, args) = split_word(args);
    if verb != "set" {
        return Err(CommandError::Usage(PREFS_SET_USAGE));
    }
    let (field, value) = split_word(args.trim_start());
    let value = value.trim();

    let list = || -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    };
    let number = || -> Result<Option<f64>, CommandError> {
        match value {
            "" => Err(CommandError::Usage(PREFS_SET_USAGE)),
            "none" | "-" => Ok(None),
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or(CommandError::Usage(PREFS_SET_USAGE)),
        }
    };

    let edit = match field {
        "roles" => PreferenceEdit::Roles(list()),
        "locations" => PreferenceEdit::Locations(list()),
        "industries" => PreferenceEdit::Industries(list()),
        "min_salary" => PreferenceEdit::MinSalary(number()?),
        "remote_weight" => PreferenceEdit::RemoteWeight(number()?),
        _ => return Err(CommandError::Usage(PREFS_SET_USAGE)),
    };
    Ok(edit)
}

/// Splits off the first word. The remainder starts after a single
/// whitespace character and keeps any further spacing.
fn split_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(at) => {
            let (word, tail) = text.split_at(at);
            let separator = tail.chars().next().map_or(0, char::len_utf8);
            (word, &tail[separator..])
        }
        None => (text, ""),
    }
}

fn parse_id(raw: &str, usage: &'static str) -> Result<JobId, CommandError> {
    raw.parse::<JobId>().map_err(|_| CommandError::Usage(usage))
}
