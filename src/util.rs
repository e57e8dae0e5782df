use crate::model::GoalEntry;

pub fn format_goal_line(position: usize, title: &str) -> String {
    format!("{position}. {title}")
}

pub fn format_goal_list(entries: &[GoalEntry]) -> String {
    let mut output = String::from("Current Goals:\n");
    if entries.is_empty() {
        output.push_str("- (none)");
        return output;
    }
    for entry in entries {
        output.push_str(&format_goal_line(entry.position, &entry.title));
        output.push('\n');
    }
    output.trim_end().to_string()
}

pub fn format_steps(steps: &[String]) -> String {
    let mut output = String::new();
    for (idx, step) in steps.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", idx + 1, step));
    }
    output.trim_end().to_string()
}

pub fn format_goal_steps(title: &str, steps: &[String]) -> String {
    let mut output = format!("Steps for goal '{title}':\n");
    if steps.is_empty() {
        output.push_str("(no steps yet)");
        return output;
    }
    output.push_str(&format_steps(steps));
    output
}
