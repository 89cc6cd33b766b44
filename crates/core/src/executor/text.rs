//! Static help text and quote pools

use rand::seq::SliceRandom;

pub const HELP_TEXT: &str = "Here's a list of available commands:
  add \"task name\" [--high|--medium|--low]   Add a task
  list                                      List tasks
  list done                                 List completed tasks
  list pending                              List pending tasks
  list [--high|--medium|--low]              List tasks by priority
  delete <taskID>                           Delete a task
  done <taskID>                             Mark task as done
  clear                                     Clear the terminal
  purge                                     Delete all tasks
  help                                      Show help
  refresh                                   Reopen the database
  wipe-db                                   Delete the database
  about                                     Know more about cmdtask
  indexeddb                                 Know more about where tasks are stored
  coffee                                    ???
  404                                       ???
  motivate                                  ???
  hack                                      ???
  ping                                      ???";

pub const ABOUT_TEXT: &str = "cmdtask is a minimalist, terminal-style to-do app for developers and keyboard-focused users. It speaks in commands, not clicks: no UI clutter, just fast task handling from your fingertips.

# How it works
cmdtask keeps your tasks in a small database file on your own machine. Nothing is sent to a server or a cloud service.
Run the command 'indexeddb' for more info.

Your tasks stay saved across restarts. They are only removed if you delete them, purge them, or wipe the database.

# What you can do
- Add tasks with high, medium or low priority
- List all your tasks, or only some of them
- Mark tasks as done or delete them
- Purge all tasks when needed
- Do everything from the keyboard

Type 'help' to get started and see available commands.";

pub const STORAGE_TEXT: &str = "About your data

cmdtask stores your tasks in a local database: one JSON file inside the data directory (CMDTASK_DATA_DIR, default .cmdtask-data).

The database keeps:
- every task, keyed by its id
- an index on priority and an index on status, for filtered listings
- a version number and the id sequence

This means:
- Your tasks stay saved even if you close the terminal or restart your computer
- Everything is private and offline
- You won't lose tasks unless you delete them, purge them or run 'wipe-db'

Every change is written as a whole: a new copy of the file replaces the old one, so an interrupted write never leaves half a change behind.";

pub const COFFEE_QUOTES: &[&str] = &[
    "Coffee first. Commits later.",
    "A yawn is a silent scream for coffee.",
    "Decaf? Never heard of that command.",
    "Brewing... please wait.",
    "There is no bug a second cup cannot reveal.",
];

pub const NOT_FOUND_QUOTES: &[&str] = &[
    "404: motivation not found. Try 'motivate'.",
    "The page you are looking for went to get coffee.",
    "Nothing to see here. Not even a task.",
    "Lost? So is this command.",
];

pub const MOTIVATION_QUOTES: &[&str] = &[
    "Small steps still move you forward.",
    "Done is better than perfect.",
    "One task at a time. You've got this.",
    "Future you will thank present you.",
    "Start where you are. Use what you have. Do what you can.",
];

pub const HACKER_QUOTES: &[&str] = &[
    "Accessing mainframe... access granted. Just kidding.",
    "Bypassing firewall with pure determination.",
    "I'm in.",
    "Downloading more RAM... 42% complete.",
    "sudo make me a sandwich",
];

/// Pick a random quote from a pool
pub fn random_quote(quotes: &[&'static str]) -> Option<&'static str> {
    quotes.choose(&mut rand::thread_rng()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_quote_from_pool() {
        for pool in [COFFEE_QUOTES, NOT_FOUND_QUOTES, MOTIVATION_QUOTES, HACKER_QUOTES] {
            let quote = random_quote(pool).unwrap();
            assert!(pool.contains(&quote));
        }
        assert!(random_quote(&[]).is_none());
    }

    #[test]
    fn test_help_lists_every_command() {
        for command in [
            "add", "list", "delete", "done", "clear", "purge", "help", "refresh", "wipe-db",
            "about", "indexeddb", "coffee", "404", "motivate", "hack", "ping",
        ] {
            assert!(HELP_TEXT.contains(command), "help is missing {}", command);
        }
    }
}
