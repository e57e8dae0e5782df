use tracing::debug;

use crate::error::AppError;
use crate::model::{DeleteOutcome, Goal, GoalEntry};
use crate::store::DocumentStore;

pub const CANCEL_TOKENS: [&str; 3] = ["", "b", "back"];

const NO_GOALS_SET_FIRST: &str = "No goals found. Please set a goal first.";
const NO_GOALS: &str = "No goals found.";
const NO_GOALS_TO_DELETE: &str = "No goals to delete.";

/// Goal and step operations. Every call reloads the document from the store and
/// writes it back at most once.
pub struct GoalService<S> {
    store: S,
}

impl<S: DocumentStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_goal(&self, title: &str) -> Result<Goal, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::BlankInput("goal"));
        }

        let mut document = self.store.load()?;
        let goal = Goal::new(title);
        document.goals.push(goal.clone());
        self.store.save(&document)?;
        debug!(position = document.goals.len(), "goal created");
        Ok(goal)
    }

    pub fn goals(&self) -> Result<Vec<Goal>, AppError> {
        Ok(self.store.load()?.goals)
    }

    pub fn list_goals(&self) -> Result<Vec<GoalEntry>, AppError> {
        Ok(goal_entries(&self.goals()?))
    }

    /// Appends entries up to the first blank one to the goal at `position`.
    /// Returns the steps that were added; nothing is written when that is empty.
    pub fn add_steps<I, T>(&self, position: usize, lines: I) -> Result<Vec<String>, AppError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let new_steps: Vec<String> = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .take_while(|line| !line.is_empty())
            .collect();
        if new_steps.is_empty() {
            return Ok(new_steps);
        }

        let mut document = self.store.load()?;
        let len = document.goals.len();
        if len == 0 {
            return Err(AppError::EmptyCollection(NO_GOALS_SET_FIRST.to_string()));
        }
        if position == 0 || position > len {
            return Err(AppError::OutOfRange {
                token: position.to_string(),
                len,
            });
        }
        document.goals[position - 1]
            .steps
            .extend(new_steps.iter().cloned());
        self.store.save(&document)?;
        debug!(position, added = new_steps.len(), "steps added");
        Ok(new_steps)
    }

    /// Removes a goal by position after the prompt confirms it.
    ///
    /// With no `token`, the prompt is asked to pick one once the goals are loaded.
    /// An empty token cancels.
    pub fn delete_goal<P: DeletePrompt>(
        &self,
        token: Option<&str>,
        prompt: &mut P,
    ) -> Result<DeleteOutcome, AppError> {
        let mut document = self.store.load()?;
        if document.goals.is_empty() {
            return Err(AppError::EmptyCollection(NO_GOALS_TO_DELETE.to_string()));
        }

        let token = match token {
            Some(token) => token.to_string(),
            None => prompt.pick(&document.goals)?,
        };
        if token.trim().is_empty() {
            return Ok(DeleteOutcome::Cancelled);
        }

        let position = resolve_goal(&document.goals, &token, NO_GOALS_TO_DELETE)?;
        if !prompt.confirm(position, &document.goals[position - 1])? {
            return Ok(DeleteOutcome::Declined);
        }

        let removed = document.goals.remove(position - 1);
        self.store.save(&document)?;
        debug!(position, "goal deleted");
        Ok(DeleteOutcome::Deleted(removed))
    }
}

/// User interaction needed while deleting a goal.
pub trait DeletePrompt {
    /// Asks for a goal number from the numbered `goals`.
    fn pick(&mut self, goals: &[Goal]) -> Result<String, AppError>;
    /// Asks whether the goal at `position` should really be removed.
    fn confirm(&mut self, position: usize, goal: &Goal) -> Result<bool, AppError>;
}

pub fn goal_entries(goals: &[Goal]) -> Vec<GoalEntry> {
    goals
        .iter()
        .enumerate()
        .map(|(idx, goal)| GoalEntry {
            position: idx + 1,
            title: goal.title.clone(),
        })
        .collect()
}

/// Resolves a menu-style selection: cancel tokens give `Ok(None)`, a valid
/// 1-based number gives its position, anything else is an error.
pub fn select_goal(goals: &[Goal], raw: &str) -> Result<Option<usize>, AppError> {
    if goals.is_empty() {
        return Err(AppError::EmptyCollection(NO_GOALS_SET_FIRST.to_string()));
    }
    let token = raw.trim().to_lowercase();
    if CANCEL_TOKENS.contains(&token.as_str()) {
        return Ok(None);
    }
    resolve_position(goals.len(), &token).map(Some)
}

/// Picks the goal whose steps should be shown; an empty step list is a valid result.
pub fn view_steps<'a>(goals: &'a [Goal], token: &str) -> Result<&'a Goal, AppError> {
    let position = resolve_goal(goals, token, NO_GOALS)?;
    Ok(&goals[position - 1])
}

fn resolve_goal(goals: &[Goal], token: &str, empty_message: &str) -> Result<usize, AppError> {
    if goals.is_empty() {
        return Err(AppError::EmptyCollection(empty_message.to_string()));
    }
    resolve_position(goals.len(), token)
}

fn resolve_position(len: usize, token: &str) -> Result<usize, AppError> {
    let token = token.trim();
    if token.is_empty() || !token.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(AppError::InvalidSelector(token.to_string()));
    }
    let out_of_range = || AppError::OutOfRange {
        token: token.to_string(),
        len,
    };
    // All-digit tokens that overflow are still just out of range.
    let position: usize = token.parse().map_err(|_| out_of_range())?;
    if position == 0 || position > len {
        return Err(out_of_range());
    }
    Ok(position)
}
