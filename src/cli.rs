use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "refine", version, about = "Track goals and the steps to reach them")]
pub struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        help = "Goals data file (defaults to refine.json next to the executable)"
    )]
    pub data_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuCommand {
    SetGoal,
    DefineSteps,
    ViewSteps,
    DisplayGoals,
    DeleteGoal,
    Exit,
}

struct MenuEntry {
    number: &'static str,
    command: MenuCommand,
    label: &'static str,
    aliases: &'static [&'static str],
}

const MENU: [MenuEntry; 6] = [
    MenuEntry {
        number: "1",
        command: MenuCommand::SetGoal,
        label: "Set a new goal",
        aliases: &["set goal", "goal", "set"],
    },
    MenuEntry {
        number: "2",
        command: MenuCommand::DefineSteps,
        label: "Define steps for a goal",
        aliases: &["define steps", "define"],
    },
    MenuEntry {
        number: "3",
        command: MenuCommand::ViewSteps,
        label: "View steps for a goal",
        aliases: &["view steps", "view"],
    },
    MenuEntry {
        number: "4",
        command: MenuCommand::DisplayGoals,
        label: "Display all goals",
        aliases: &["display goals", "display"],
    },
    MenuEntry {
        number: "5",
        command: MenuCommand::DeleteGoal,
        label: "Delete a goal",
        aliases: &["delete goal", "delete"],
    },
    MenuEntry {
        number: "6",
        command: MenuCommand::Exit,
        label: "Exit",
        aliases: &["exit"],
    },
];

impl MenuCommand {
    /// Resolves a menu number or alias, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = input.trim().to_lowercase();
        MENU.iter()
            .find(|entry| entry.number == choice || entry.aliases.contains(&choice.as_str()))
            .map(|entry| entry.command)
    }
}

pub fn format_menu() -> String {
    let mut output = String::from("Refine - Main Menu\n");
    for entry in &MENU {
        output.push_str(&format!("{}. {}\n", entry.number, entry.label));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_aliases_resolve() {
        assert_eq!(MenuCommand::parse("1"), Some(MenuCommand::SetGoal));
        assert_eq!(MenuCommand::parse("set"), Some(MenuCommand::SetGoal));
        assert_eq!(MenuCommand::parse("Set Goal"), Some(MenuCommand::SetGoal));
        assert_eq!(MenuCommand::parse(" define "), Some(MenuCommand::DefineSteps));
        assert_eq!(MenuCommand::parse("VIEW steps"), Some(MenuCommand::ViewSteps));
        assert_eq!(MenuCommand::parse("display"), Some(MenuCommand::DisplayGoals));
        assert_eq!(MenuCommand::parse("delete goal"), Some(MenuCommand::DeleteGoal));
        assert_eq!(MenuCommand::parse("6"), Some(MenuCommand::Exit));
        assert_eq!(MenuCommand::parse("Exit"), Some(MenuCommand::Exit));
    }

    #[test]
    fn unknown_choices_do_not_resolve() {
        for input in ["", "7", "0", "quit", "goals", "1 2"] {
            assert_eq!(MenuCommand::parse(input), None, "input {input:?}");
        }
    }

    #[test]
    fn menu_lists_all_options_in_order() {
        let menu = format_menu();
        let lines: Vec<&str> = menu.lines().collect();
        assert_eq!(lines[0], "Refine - Main Menu");
        assert_eq!(lines[1], "1. Set a new goal");
        assert_eq!(lines[6], "6. Exit");
    }

    #[test]
    fn data_file_flag_is_optional() {
        let cli = Cli::try_parse_from(["refine"]).expect("no args");
        assert!(cli.data_file.is_none());
        let cli = Cli::try_parse_from(["refine", "--data-file", "/tmp/goals.json"])
            .expect("data file");
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/goals.json")));
    }
}
