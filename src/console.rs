use std::io::{BufRead, Write};

use tracing::debug;

use crate::app::{
    goal_entries, select_goal, view_steps, DeletePrompt, GoalService, CANCEL_TOKENS,
};
use crate::cli::{format_menu, MenuCommand};
use crate::error::AppError;
use crate::model::{DeleteOutcome, Goal};
use crate::store::DocumentStore;
use crate::util::{format_goal_line, format_goal_list, format_goal_steps, format_steps};

const GOODBYE: &str = "Exiting Refine. Goodbye!";
const SELECT_HINT: &str = "Options: enter a number (1..n) • Enter = back • b = back";
const SELECT_INVALID: &str = "Please enter a number (e.g., 1) or press Enter to go back.";
const GOAL_NUMBER_INVALID: &str = "Please enter a goal number (e.g., 1).";

/// Line-oriented prompt over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
    eof: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            eof: false,
        }
    }

    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), AppError> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Prints `prompt` and reads one trimmed line. End of input reads as an empty line.
    pub fn ask(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.eof = true;
        }
        Ok(line.trim().to_string())
    }

    pub fn at_eof(&self) -> bool {
        self.eof
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints the message for an input-validation error; anything else is returned.
    fn report(&mut self, err: AppError, invalid_hint: &str) -> Result<(), AppError> {
        if !err.is_recoverable() {
            return Err(err);
        }
        debug!(error = %err, "input rejected");
        match err {
            AppError::BlankInput(label) => self.say(format!("No {label} entered. Cancelled.")),
            AppError::InvalidSelector(_) => self.say(invalid_hint),
            AppError::OutOfRange { .. } => self.say("Number out of range."),
            AppError::EmptyCollection(message) => self.say(message),
            err => Err(err),
        }
    }
}

impl<R: BufRead, W: Write> DeletePrompt for Console<R, W> {
    fn pick(&mut self, goals: &[Goal]) -> Result<String, AppError> {
        self.say(format_goal_list(&goal_entries(goals)))?;
        self.ask("Which goal do you want to delete? Enter the goal number (1..n): ")
    }

    fn confirm(&mut self, position: usize, goal: &Goal) -> Result<bool, AppError> {
        self.say(format!("Selected: {}", format_goal_line(position, &goal.title)))?;
        let answer = self
            .ask("Are you sure you want to delete this goal? (y/n): ")?
            .to_lowercase();
        match answer.as_str() {
            "y" => Ok(true),
            "n" => {
                self.say("Deletion cancelled.")?;
                Ok(false)
            }
            _ => {
                self.say("Invalid input. Deletion cancelled.")?;
                Ok(false)
            }
        }
    }
}

/// Runs the main menu until the user exits or input ends.
pub fn run_menu<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    loop {
        console.say("")?;
        console.say(format_menu())?;
        let choice = console.ask("Select an option (1-6): ")?;
        if console.at_eof() && choice.is_empty() {
            console.say("")?;
            return console.say(GOODBYE);
        }

        match MenuCommand::parse(&choice) {
            Some(MenuCommand::SetGoal) => handle_set_goal(service, console)?,
            Some(MenuCommand::DefineSteps) => handle_define_steps(service, console)?,
            Some(MenuCommand::ViewSteps) => handle_view_steps(service, console)?,
            Some(MenuCommand::DisplayGoals) => handle_display_goals(service, console)?,
            Some(MenuCommand::DeleteGoal) => handle_delete_goal(service, console)?,
            Some(MenuCommand::Exit) => return console.say(GOODBYE),
            None => console.say("Invalid choice. Please select a valid option.")?,
        }
    }
}

fn handle_set_goal<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    let title = console.ask("Enter your main goal: ")?;
    match service.create_goal(&title) {
        Ok(goal) => console.say(format!("Goal '{}' added.", goal.title)),
        Err(err) => console.report(err, SELECT_INVALID),
    }
}

fn handle_define_steps<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    let goals = service.goals()?;
    let selection = if goals.is_empty() {
        select_goal(&goals, "")
    } else {
        console.say(format_goal_list(&goal_entries(&goals)))?;
        console.say(SELECT_HINT)?;
        let raw = console.ask("Choose a goal number: ")?;
        select_goal(&goals, &raw)
    };
    let position = match selection {
        Ok(Some(position)) => position,
        Ok(None) => return console.say("Back to menu."),
        Err(err) => return console.report(err, SELECT_INVALID),
    };

    console.say(format!("Selected goal: {}", goals[position - 1].title))?;
    let action = console
        .ask("Add steps now? (a = add / Enter = back): ")?
        .to_lowercase();
    if CANCEL_TOKENS.contains(&action.as_str()) {
        return console.say("Back to menu.");
    }
    if action != "a" && action != "add" {
        return console.say("Invalid choice. Back to menu.");
    }

    console.say("Enter steps one per line. Press Enter on an empty line to finish.")?;
    let mut lines = Vec::new();
    loop {
        let step = console.ask("Step: ")?;
        if step.is_empty() {
            break;
        }
        lines.push(step);
    }

    match service.add_steps(position, &lines) {
        Ok(added) if added.is_empty() => console.say("No steps entered. Back to menu."),
        Ok(added) => {
            console.say("Added steps:")?;
            console.say(format_steps(&added))
        }
        Err(err) => console.report(err, SELECT_INVALID),
    }
}

fn handle_view_steps<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    let goals = service.goals()?;
    console.say(format_goal_list(&goal_entries(&goals)))?;
    let token = if goals.is_empty() {
        String::new()
    } else {
        console.ask("Enter goal number: ")?
    };
    match view_steps(&goals, &token) {
        Ok(goal) => console.say(format_goal_steps(&goal.title, &goal.steps)),
        Err(err) => console.report(err, GOAL_NUMBER_INVALID),
    }
}

fn handle_display_goals<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    let entries = service.list_goals()?;
    console.say(format_goal_list(&entries))
}

fn handle_delete_goal<S, R, W>(
    service: &GoalService<S>,
    console: &mut Console<R, W>,
) -> Result<(), AppError>
where
    S: DocumentStore,
    R: BufRead,
    W: Write,
{
    match service.delete_goal(None, console) {
        Ok(DeleteOutcome::Deleted(_)) => console.say("Goal deleted."),
        Ok(DeleteOutcome::Declined) => Ok(()),
        Ok(DeleteOutcome::Cancelled) => console.say("Cancelled."),
        Err(err) => console.report(err, GOAL_NUMBER_INVALID),
    }
}
