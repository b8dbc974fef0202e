//! Line-oriented editor for one form
//!
//! Reads one command per line, applies it to a [`FormEditorController`] and
//! re-renders the draft. Question numbers are 1-based. Questions only move by
//! one position at a time (`up`/`down`).

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};

use super::list_view::render_draft;
use crate::api::FormsApi;
use crate::controllers::FormEditorController;
use crate::state::{FormRecord, QuestionEdit};

const HELP: &str = "\
Commands:
  title <text>          set the form title
  desc <text>           set the description
  add                   append a question
  text <n> <text>       set the text of question n
  req <n> yes|no        mark question n required or optional
  rm <n>                remove question n
  up <n> / down <n>     move question n by one position
  show                  print the form
  save                  save and leave
  quit                  leave without saving";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Title(String),
    Description(String),
    Add,
    Text { number: usize, text: String },
    Required { number: usize, required: bool },
    Remove(usize),
    Up(usize),
    Down(usize),
    Show,
    Save,
    Quit,
    Help,
}

/// How the shell ended
#[derive(Debug, Clone, PartialEq)]
pub enum ShellExit {
    Saved(FormRecord),
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "title" => ShellCommand::Title(rest.to_string()),
        "desc" | "description" => ShellCommand::Description(rest.to_string()),
        "add" => ShellCommand::Add,
        "text" => {
            let (number, text) = split_number(rest)?;
            ShellCommand::Text {
                number,
                text: text.to_string(),
            }
        }
        "req" | "required" => {
            let (number, flag) = split_number(rest)?;
            ShellCommand::Required {
                number,
                required: parse_flag(flag)?,
            }
        }
        "rm" | "remove" => ShellCommand::Remove(parse_number(rest)?),
        "up" => ShellCommand::Up(parse_number(rest)?),
        "down" => ShellCommand::Down(parse_number(rest)?),
        "show" | "ls" => ShellCommand::Show,
        "save" => ShellCommand::Save,
        "quit" | "q" | "exit" => ShellCommand::Quit,
        "help" | "?" => ShellCommand::Help,
        other => bail!("unknown command `{other}` (try `help`)"),
    };
    Ok(command)
}

fn parse_number(s: &str) -> Result<usize> {
    let number: usize = s
        .trim()
        .parse()
        .with_context(|| format!("expected a question number, got `{s}`"))?;
    if number == 0 {
        bail!("question numbers start at 1");
    }
    Ok(number)
}

fn split_number(s: &str) -> Result<(usize, &str)> {
    let (number, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
    Ok((parse_number(number)?, rest.trim()))
}

fn parse_flag(s: &str) -> Result<bool> {
    match s {
        "yes" | "y" | "on" | "true" => Ok(true),
        "no" | "n" | "off" | "false" => Ok(false),
        other => Err(anyhow!("expected yes or no, got `{other}`")),
    }
}

fn show<A: FormsApi>(editor: &FormEditorController<A>) -> String {
    render_draft(editor.draft(), editor.state(), editor.form_id())
}

/// Run the shell until `save` succeeds, `quit`, or end of input
pub async fn run_editor<A, R, W>(
    editor: &mut FormEditorController<A>,
    input: R,
    output: &mut W,
) -> Result<ShellExit>
where
    A: FormsApi,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", show(editor))?;
    if let Some(err) = editor.error() {
        writeln!(output, "error: {err}")?;
    }

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "error: {e:#}")?;
                continue;
            }
        };
        // Each command reports its own outcome; an older error no longer applies
        editor.clear_error();
        if let Some(exit) = apply(editor, command, output).await? {
            return Ok(exit);
        }
    }

    editor.session().invalidate();
    Ok(ShellExit::Quit)
}

/// Apply one command. Editor errors are printed and the shell continues.
async fn apply<A, W>(
    editor: &mut FormEditorController<A>,
    command: ShellCommand,
    output: &mut W,
) -> Result<Option<ShellExit>>
where
    A: FormsApi,
    W: Write,
{
    let was_new = editor.is_new();
    let result = match command {
        ShellCommand::Title(title) => editor.set_title(title),
        ShellCommand::Description(description) => editor.set_description(description),
        ShellCommand::Add => editor.add_question().map(|_| ()),
        ShellCommand::Text { number, text } => {
            editor.update_question(number - 1, QuestionEdit::Text(text))
        }
        ShellCommand::Required { number, required } => {
            editor.update_question(number - 1, QuestionEdit::Required(required))
        }
        ShellCommand::Remove(number) => editor.remove_question(number - 1),
        ShellCommand::Up(number) => {
            if number == 1 {
                writeln!(output, "question 1 is already first")?;
                return Ok(None);
            }
            editor.reorder_questions(number - 1, number - 2)
        }
        ShellCommand::Down(number) => {
            if number == editor.draft().question_count() {
                writeln!(output, "question {number} is already last")?;
                return Ok(None);
            }
            editor.reorder_questions(number - 1, number)
        }
        ShellCommand::Show => Ok(()),
        ShellCommand::Help => {
            writeln!(output, "{HELP}")?;
            return Ok(None);
        }
        ShellCommand::Quit => {
            editor.session().invalidate();
            return Ok(Some(ShellExit::Quit));
        }
        ShellCommand::Save => match editor.submit().await {
            Ok(record) => {
                let verb = if was_new { "Created" } else { "Saved" };
                writeln!(output, "{verb} form {}", record.form_id)?;
                return Ok(Some(ShellExit::Saved(record)));
            }
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => write!(output, "{}", show(editor))?,
        Err(e) if e.is_validation() => writeln!(output, "cannot save: {e}")?,
        Err(e) => writeln!(output, "error: {e}")?,
    }
    Ok(None)
}
