//! `laos routes ...` argument handling and dispatch.

use std::collections::VecDeque;

use serde_json::{Map, Value};

use laos_client::{
    AppName, ExecutionType, NewRoute, ProjectId, ProjectResolver, RoutePath, Routes, SessionClient,
};

use crate::error::CliError;

/// Help text printed on usage errors.
pub const USAGE: &str = "\
usage: laos [--project <id>] routes <command>

commands:
  list    <app>
  show    <app> <path>
  create  <app> <path> <image> [--type <sync|async|...>] [--public] [--memory <mb>]
          [--timeout <secs>] [--max-concurrency <n>] [--config KEY=VALUE]...
  update  <app> <path> KEY=VALUE...
  delete  <app> <path>
  execute <app> <path> [--supply-auth] [<json-object>]";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// Project given with `--project`, if any.
    pub project: Option<ProjectId>,
    /// What to do.
    pub command: Command,
}

/// One routes operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List { app: AppName },
    Show { app: AppName, path: RoutePath },
    Create { app: AppName, route: NewRoute },
    Update { app: AppName, path: RoutePath, fields: Map<String, Value> },
    Delete { app: AppName, path: RoutePath },
    Execute { app: AppName, path: RoutePath, supply_auth: bool, data: Map<String, Value> },
}

/// Parse arguments (without the program name).
///
/// # Errors
/// Returns [`CliError::Usage`] for unknown commands, missing or extra
/// arguments, and bad flag values; [`CliError::Core`] for malformed route
/// paths; [`CliError::Json`] for an invalid payload.
pub fn parse<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut project = None;
    let mut rest = VecDeque::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--project" {
            let id = args.next().ok_or_else(|| CliError::usage("--project needs a value"))?;
            project = Some(ProjectId::from(id));
        } else {
            rest.push_back(arg);
        }
    }

    match rest.pop_front().as_deref() {
        Some("routes") => {}
        Some(other) => return Err(CliError::usage(format!("unknown resource '{other}'"))),
        None => return Err(CliError::usage("missing resource")),
    }

    let sub = rest.pop_front().ok_or_else(|| CliError::usage("missing routes command"))?;
    let command = match sub.as_str() {
        "list" => {
            let app = app_arg(&mut rest)?;
            no_more(&rest)?;
            Command::List { app }
        }
        "show" => {
            let (app, path) = (app_arg(&mut rest)?, path_arg(&mut rest)?);
            no_more(&rest)?;
            Command::Show { app, path }
        }
        "delete" => {
            let (app, path) = (app_arg(&mut rest)?, path_arg(&mut rest)?);
            no_more(&rest)?;
            Command::Delete { app, path }
        }
        "create" => parse_create(rest)?,
        "update" => {
            let (app, path) = (app_arg(&mut rest)?, path_arg(&mut rest)?);
            if rest.is_empty() {
                return Err(CliError::usage("update needs at least one KEY=VALUE"));
            }
            let mut fields = Map::new();
            for pair in rest {
                let (key, raw) = split_pair(&pair)?;
                fields.insert(key.to_owned(), json_or_string(raw));
            }
            Command::Update { app, path, fields }
        }
        "execute" => parse_execute(rest)?,
        other => return Err(CliError::usage(format!("unknown routes command '{other}'"))),
    };

    Ok(Invocation { project, command })
}

fn parse_create(mut rest: VecDeque<String>) -> Result<Command, CliError> {
    let mut positional = Vec::new();
    let mut execution_type = ExecutionType::Sync;
    let mut is_public = false;
    let mut memory = None;
    let mut timeout = None;
    let mut max_concurrency = None;
    let mut config = Vec::new();

    while let Some(arg) = rest.pop_front() {
        match arg.as_str() {
            "--type" => execution_type = ExecutionType::from(flag_value(&mut rest, "--type")?),
            "--public" => is_public = true,
            "--memory" => memory = Some(number(&mut rest, "--memory")?),
            "--timeout" => timeout = Some(number(&mut rest, "--timeout")?),
            "--max-concurrency" => max_concurrency = Some(number(&mut rest, "--max-concurrency")?),
            "--config" => {
                let pair = flag_value(&mut rest, "--config")?;
                let (key, value) = split_pair(&pair)?;
                config.push((key.to_owned(), value.to_owned()));
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::usage(format!("unknown flag '{flag}'")));
            }
            _ => positional.push(arg),
        }
    }

    let [app, path, image]: [String; 3] = positional
        .try_into()
        .map_err(|_| CliError::usage("create needs <app> <path> <image>"))?;

    let mut route = NewRoute::new(execution_type, RoutePath::new(path)?, image).public(is_public);
    if let Some(mb) = memory {
        route = route.memory(mb);
    }
    if let Some(secs) = timeout {
        route = route.timeout(secs);
    }
    if let Some(n) = max_concurrency {
        route = route.max_concurrency(n);
    }
    for (key, value) in config {
        route = route.config_entry(key, value);
    }
    Ok(Command::Create { app: AppName::from(app), route })
}

fn parse_execute(mut rest: VecDeque<String>) -> Result<Command, CliError> {
    let mut supply_auth = false;
    let mut positional = Vec::new();
    while let Some(arg) = rest.pop_front() {
        if arg == "--supply-auth" {
            supply_auth = true;
        } else if arg.starts_with("--") {
            return Err(CliError::usage(format!("unknown flag '{arg}'")));
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let app = positional.next().map(AppName::from).ok_or_else(|| CliError::usage("missing <app>"))?;
    let path = RoutePath::new(positional.next().ok_or_else(|| CliError::usage("missing <path>"))?)?;
    let data = match positional.next() {
        Some(raw) => match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => map,
            _ => return Err(CliError::usage("execution payload must be a JSON object")),
        },
        None => Map::new(),
    };
    if positional.next().is_some() {
        return Err(CliError::usage("too many arguments"));
    }
    Ok(Command::Execute { app, path, supply_auth, data })
}

fn app_arg(rest: &mut VecDeque<String>) -> Result<AppName, CliError> {
    rest.pop_front().map(AppName::from).ok_or_else(|| CliError::usage("missing <app>"))
}

fn path_arg(rest: &mut VecDeque<String>) -> Result<RoutePath, CliError> {
    let raw = rest.pop_front().ok_or_else(|| CliError::usage("missing <path>"))?;
    Ok(RoutePath::new(raw)?)
}

fn no_more(rest: &VecDeque<String>) -> Result<(), CliError> {
    match rest.front() {
        Some(extra) => Err(CliError::usage(format!("unexpected argument '{extra}'"))),
        None => Ok(()),
    }
}

fn flag_value(rest: &mut VecDeque<String>, flag: &str) -> Result<String, CliError> {
    rest.pop_front().ok_or_else(|| CliError::usage(format!("{flag} needs a value")))
}

fn number(rest: &mut VecDeque<String>, flag: &str) -> Result<u32, CliError> {
    let raw = flag_value(rest, flag)?;
    raw.parse()
        .map_err(|e| CliError::usage(format!("{flag} expects a whole number, got '{raw}': {e}")))
}

fn split_pair(pair: &str) -> Result<(&str, &str), CliError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(CliError::usage(format!("expected KEY=VALUE, got '{pair}'"))),
    }
}

/// `256` becomes a number, `"x"` a string, anything unparseable a plain string.
fn json_or_string(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Run one invocation against the routes API.
///
/// # Errors
/// Propagates [`laos_client::ClientError`] from the API call.
pub async fn run<S, R>(routes: &Routes<S, R>, invocation: Invocation) -> Result<Value, CliError>
where
    S: SessionClient,
    R: ProjectResolver,
{
    let project = invocation.project.as_ref();
    let response = match invocation.command {
        Command::List { app } => routes.list(project, &app).await?,
        Command::Show { app, path } => routes.show(project, &app, &path).await?,
        Command::Create { app, route } => routes.create(project, &app, &route).await?,
        Command::Update { app, path, fields } => routes.update(project, &app, &path, fields).await?,
        Command::Delete { app, path } => routes.delete(project, &app, &path).await?,
        Command::Execute { app, path, supply_auth, data } => {
            routes.execute(project, &app, &path, supply_auth, data).await?
        }
    };
    Ok(response)
}
