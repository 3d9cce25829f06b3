// Interactive board session: one UI event per input line, processed to
// completion before the next line is read.

use crate::board::{Board, Outcome};
use crate::cli::error::{validate_column, validate_task_id};
use crate::cli::output::{format_board, format_modal, BoardRenderOptions};
use crate::models::{Column, TaskId};
use crate::repo::KeyValueStore;
use anyhow::Result;
use std::io::{BufRead, Write};

const SHELL_HELP: &str = "\
Events:
  new | toggle       open or close the new-task dialog
  close              close the dialog (fields are kept)
  title <text>       set the dialog's title
  desc <text>        add a line to the dialog's description
  submit             create the task and close the dialog
  drag <id>          start dragging a card
  enter <column>     drag over a column
  leave <column>     drag away from a column
  drop <column>      drop the dragged card on a column
  cancel             abandon the drag
  delete <id>        delete a card
  show               redraw the board
  help               show this help
  quit | exit        leave the session
Columns: todo, progress, done";

/// A single UI event typed at the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    ToggleModal,
    CloseModal,
    Title(String),
    Description(String),
    Submit,
    Drag(TaskId),
    Enter(Column),
    Leave(Column),
    /// Raw identifier; unknown columns end the drag without a move
    Drop(String),
    Cancel,
    Delete(TaskId),
    Show,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_event(line: &str) -> Result<Option<ShellEvent>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb.to_lowercase().as_str() {
        "new" | "add" | "toggle" => ShellEvent::ToggleModal,
        "close" => ShellEvent::CloseModal,
        "title" => ShellEvent::Title(rest.to_string()),
        "desc" | "description" => ShellEvent::Description(rest.to_string()),
        "submit" => ShellEvent::Submit,
        "drag" => ShellEvent::Drag(validate_task_id(require_arg(verb, rest, "a task id")?)?),
        "enter" => ShellEvent::Enter(validate_column(require_arg(verb, rest, "a column")?)?),
        "leave" => ShellEvent::Leave(validate_column(require_arg(verb, rest, "a column")?)?),
        "drop" => ShellEvent::Drop(require_arg(verb, rest, "a column")?.to_string()),
        "cancel" => ShellEvent::Cancel,
        "delete" | "rm" => ShellEvent::Delete(validate_task_id(require_arg(verb, rest, "a task id")?)?),
        "show" | "board" | "list" => ShellEvent::Show,
        "help" | "?" => ShellEvent::Help,
        "quit" | "exit" | "q" => ShellEvent::Quit,
        other => return Err(format!("Unknown event '{}'. Type 'help' for a list.", other)),
    };
    Ok(Some(event))
}

fn require_arg<'a>(verb: &str, rest: &'a str, what: &str) -> Result<&'a str, String> {
    if rest.is_empty() {
        Err(format!("'{}' needs {}", verb, what))
    } else {
        Ok(rest)
    }
}

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Render,
    Quiet,
    Quit,
}

/// Event loop over a board
pub struct Shell<'b, S: KeyValueStore, W: Write> {
    board: &'b mut Board<S>,
    out: W,
    options: BoardRenderOptions,
    prompt: bool,
}

impl<'b, S: KeyValueStore, W: Write> Shell<'b, S, W> {
    pub fn new(board: &'b mut Board<S>, out: W, options: BoardRenderOptions) -> Self {
        Self {
            board,
            out,
            options,
            prompt: false,
        }
    }

    /// Print a prompt before each line (interactive terminals only)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Read events until end of input or `quit`
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.render()?;
        self.show_prompt()?;
        for line in input.lines() {
            let line = line?;
            let flow = match parse_event(&line) {
                Ok(Some(event)) => self.apply(event)?,
                Ok(None) => Flow::Quiet,
                Err(message) => {
                    writeln!(self.out, "{}", message)?;
                    Flow::Quiet
                }
            };
            match flow {
                Flow::Quit => break,
                Flow::Render => self.render()?,
                Flow::Quiet => {}
            }
            self.show_prompt()?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn apply(&mut self, event: ShellEvent) -> Result<Flow> {
        log::debug!("Shell event: {:?}", event);
        let flow = match event {
            ShellEvent::ToggleModal => {
                self.board.modal_mut().toggle();
                Flow::Render
            }
            ShellEvent::CloseModal => {
                self.board.modal_mut().close();
                Flow::Render
            }
            ShellEvent::Title(title) => {
                if !self.board.modal().is_open() {
                    writeln!(self.out, "Open the new-task dialog first ('new').")?;
                    return Ok(Flow::Quiet);
                }
                self.board.modal_mut().set_title(&title);
                Flow::Render
            }
            ShellEvent::Description(line) => {
                if !self.board.modal().is_open() {
                    writeln!(self.out, "Open the new-task dialog first ('new').")?;
                    return Ok(Flow::Quiet);
                }
                self.board.modal_mut().append_description_line(&line);
                Flow::Render
            }
            ShellEvent::Submit => {
                if let Some((id, outcome)) = self.board.submit_modal() {
                    writeln!(self.out, "Created task {}.", id)?;
                    self.report(&outcome)?;
                }
                Flow::Render
            }
            ShellEvent::Drag(id) => {
                if !self.board.drag_start(id) {
                    writeln!(self.out, "No task {} on the board.", id)?;
                    return Ok(Flow::Quiet);
                }
                Flow::Render
            }
            ShellEvent::Enter(column) => {
                self.board.drag_enter(column);
                Flow::Render
            }
            ShellEvent::Leave(column) => {
                self.board.drag_leave(column);
                Flow::Render
            }
            ShellEvent::Drop(column_id) => {
                let outcome = self.board.drop_on_named(&column_id);
                self.report(&outcome)?;
                Flow::Render
            }
            ShellEvent::Cancel => {
                self.board.cancel_drag();
                Flow::Render
            }
            ShellEvent::Delete(id) => {
                let outcome = self.board.delete(id);
                if !outcome.is_changed() {
                    writeln!(self.out, "No task {} on the board.", id)?;
                    return Ok(Flow::Quiet);
                }
                self.report(&outcome)?;
                Flow::Render
            }
            ShellEvent::Show => Flow::Render,
            ShellEvent::Help => {
                writeln!(self.out, "{}", SHELL_HELP)?;
                Flow::Quiet
            }
            ShellEvent::Quit => Flow::Quit,
        };
        Ok(flow)
    }

    fn report(&mut self, outcome: &Outcome) -> Result<()> {
        if let Some(e) = outcome.save_error() {
            writeln!(self.out, "Warning: changes could not be saved: {}", e)?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let options = self
            .options
            .clone()
            .with_hover(self.board.drag().hover_flags());
        let board = format_board(&self.board.projection(), &options);
        write!(self.out, "{}", board)?;
        if let Some(id) = self.board.drag().dragged() {
            writeln!(self.out, "Dragging task {}.", id)?;
        }
        if self.board.is_persistence_degraded() {
            writeln!(self.out, "Storage unavailable: changes are not being saved.")?;
        }
        write!(self.out, "{}", format_modal(self.board.modal(), self.options.color))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn show_prompt(&mut self) -> Result<()> {
        if self.prompt {
            write!(self.out, "taskflow> ")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
