use std::path::PathBuf;

use summarizer_core::SummaryLength;

pub const HELP: &str = "\
Commands:
  drop <path>...    replace the selection with these files (drop target)
  pick <path>...    replace the selection with these files (file picker)
  length <value>    summary length: short, medium or long
  submit            send the selection to the summarization service
  status            show the current state
  health            check the service health endpoint
  help              show this text
  quit              exit once any running request has finished
Quote paths that contain spaces: pick \"my report.pdf\"";

/// One line of console input, already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Drop(Vec<PathBuf>),
    Pick(Vec<PathBuf>),
    Length(SummaryLength),
    Submit,
    Status,
    Health,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let mut words = split_words(line)?.into_iter();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<String> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "drop" => ConsoleCommand::Drop(args.into_iter().map(PathBuf::from).collect()),
        "pick" => ConsoleCommand::Pick(args.into_iter().map(PathBuf::from).collect()),
        "length" => match args.as_slice() {
            [value] => ConsoleCommand::Length(value.parse()?),
            _ => return Err("usage: length <short|medium|long>".to_string()),
        },
        "submit" => ConsoleCommand::Submit,
        "status" => ConsoleCommand::Status,
        "health" => ConsoleCommand::Health,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn split_words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
