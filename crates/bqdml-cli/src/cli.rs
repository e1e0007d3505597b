use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Insert,
    Update,
    Where,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(HelpTopic),
    Insert(InsertArgs),
    Update(UpdateArgs),
    Where(WhereArgs),
}

/// A JSON input location: a file path or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn parse(v: &str) -> Self {
        if v == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(v))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertArgs {
    pub config: Option<PathBuf>,
    pub table: String,
    pub records: Input,
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereSource {
    /// Structured predicate read from JSON.
    Predicate { input: Input, grouping: String },
    /// Pre-rendered WHERE text.
    Sql(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateArgs {
    pub config: Option<PathBuf>,
    pub table: String,
    pub set: Input,
    pub condition: WhereSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereArgs {
    pub config: Option<PathBuf>,
    pub predicate: Input,
    pub grouping: String,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "insert" => parse_insert(it),
        "update" => parse_update(it),
        "where" => parse_where(it),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// Read the value of `--name <v>` / `--name=<v>`, or `None` if `token` is not `name`.
fn flag_value<'a>(
    token: &'a str,
    name: &str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<&'a str>> {
    if token == name {
        let Some(v) = it.next() else {
            anyhow::bail!("{name} requires a value");
        };
        return Ok(Some(v));
    }
    match token.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
        Some(v) => Ok(Some(v)),
        None => Ok(None),
    }
}

fn split_csv(v: &str) -> Vec<String> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn parse_insert<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut table: Option<String> = None;
    let mut records = Input::Stdin;
    let mut columns: Option<Vec<String>> = None;

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Insert));
        }
        if let Some(v) = flag_value(token, "--config", &mut it)? {
            config = Some(PathBuf::from(v));
        } else if let Some(v) = flag_value(token, "--table", &mut it)? {
            table = Some(v.to_string());
        } else if let Some(v) = flag_value(token, "--records", &mut it)? {
            records = Input::parse(v);
        } else if let Some(v) = flag_value(token, "--columns", &mut it)? {
            let parsed = split_csv(v);
            if parsed.is_empty() {
                anyhow::bail!("--columns must not be empty");
            }
            columns = Some(parsed);
        } else {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    let Some(table) = table else {
        anyhow::bail!("insert requires --table");
    };

    Ok(Command::Insert(InsertArgs {
        config,
        table,
        records,
        columns,
    }))
}

fn parse_update<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut table: Option<String> = None;
    let mut set: Option<Input> = None;
    let mut where_input: Option<Input> = None;
    let mut where_sql: Option<String> = None;
    let mut grouping: Option<String> = None;

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Update));
        }
        if let Some(v) = flag_value(token, "--config", &mut it)? {
            config = Some(PathBuf::from(v));
        } else if let Some(v) = flag_value(token, "--table", &mut it)? {
            table = Some(v.to_string());
        } else if let Some(v) = flag_value(token, "--set", &mut it)? {
            set = Some(Input::parse(v));
        } else if let Some(v) = flag_value(token, "--where-sql", &mut it)? {
            where_sql = Some(v.to_string());
        } else if let Some(v) = flag_value(token, "--where", &mut it)? {
            where_input = Some(Input::parse(v));
        } else if let Some(v) = flag_value(token, "--grouping", &mut it)? {
            grouping = Some(v.to_string());
        } else {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    let Some(table) = table else {
        anyhow::bail!("update requires --table");
    };
    let Some(set) = set else {
        anyhow::bail!("update requires --set");
    };
    let condition = match (where_input, where_sql) {
        (Some(input), None) => WhereSource::Predicate {
            input,
            grouping: grouping.unwrap_or_else(|| "AND".to_string()),
        },
        (None, Some(_)) if grouping.is_some() => {
            anyhow::bail!("--grouping only applies to --where")
        }
        (None, Some(sql)) => WhereSource::Sql(sql),
        (Some(_), Some(_)) => anyhow::bail!("--where and --where-sql are mutually exclusive"),
        (None, None) => anyhow::bail!("update requires --where or --where-sql"),
    };
    if set == Input::Stdin
        && matches!(
            condition,
            WhereSource::Predicate {
                input: Input::Stdin,
                ..
            }
        )
    {
        anyhow::bail!("--set and --where cannot both read from stdin");
    }

    Ok(Command::Update(UpdateArgs {
        config,
        table,
        set,
        condition,
    }))
}

fn parse_where<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config: Option<PathBuf> = None;
    let mut predicate = Input::Stdin;
    let mut grouping = "AND".to_string();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Where));
        }
        if let Some(v) = flag_value(token, "--config", &mut it)? {
            config = Some(PathBuf::from(v));
        } else if let Some(v) = flag_value(token, "--predicate", &mut it)? {
            predicate = Input::parse(v);
        } else if let Some(v) = flag_value(token, "--grouping", &mut it)? {
            grouping = v.to_string();
        } else {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    Ok(Command::Where(WhereArgs {
        config,
        predicate,
        grouping,
    }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
bqdml - compose BigQuery DML statements from JSON records

USAGE:
  bqdml <COMMAND> [OPTIONS]

COMMANDS:
  insert        Compose a multi-row INSERT
  update        Compose an UPDATE ... SET ... WHERE
  where         Compose a standalone WHERE clause

Run `bqdml <command> --help` for more."
            );
        }
        HelpTopic::Insert => {
            println!(
                "\
USAGE:
  bqdml insert --table <TABLE> [OPTIONS]

OPTIONS:
  --table <TABLE>       Fully-qualified table reference (passed through as-is)
  --records <FILE>      JSON array of objects; `-` reads stdin (default: -)
  --columns <a,b,...>   Explicit column list; values are matched by name
  --config <FILE>       Config file (bqdml.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Update => {
            println!(
                "\
USAGE:
  bqdml update --table <TABLE> --set <FILE> --where <FILE> [OPTIONS]
  bqdml update --table <TABLE> --set <FILE> --where-sql <TEXT> [OPTIONS]

OPTIONS:
  --table <TABLE>       Fully-qualified table reference (passed through as-is)
  --set <FILE>          JSON object of column values; `-` reads stdin
  --where <FILE>        JSON object of equality conditions; `-` reads stdin
  --grouping <AND|OR>   Connective for --where conditions (default: AND)
  --where-sql <TEXT>    Pre-rendered WHERE text (leading WHERE is stripped)
  --config <FILE>       Config file (bqdml.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Where => {
            println!(
                "\
USAGE:
  bqdml where [OPTIONS]

OPTIONS:
  --predicate <FILE>    JSON object of equality conditions; `-` reads stdin (default: -)
  --grouping <AND|OR>   Connective between conditions (default: AND)
  --config <FILE>       Config file (bqdml.toml)
  -h, --help            Print help"
            );
        }
    }
}
