use snakesim::game::Direction;

/// A line of input from the controlling process
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Turn(Direction),
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
}

impl Command {
    pub(crate) fn from_line(line: &str) -> Option<Command> {
        match line.trim().to_ascii_lowercase().as_str() {
            "w" | "k" | "up" => Some(Command::Turn(Direction::Up)),
            "s" | "j" | "down" => Some(Command::Turn(Direction::Down)),
            "a" | "h" | "left" => Some(Command::Turn(Direction::Left)),
            "d" | "l" | "right" => Some(Command::Turn(Direction::Right)),
            "start" | "n" => Some(Command::Start),
            "pause" | "p" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "restart" | "r" => Some(Command::Restart),
            "quit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }
}
