use super::value::ValueKind;

/// Effect a behavior branch applies to the snake.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Command {
    #[default]
    NoOp = 0,
    KillSnake = 1,
    StopSnake = 2,
    ModifyAcceleration = 3,
    ModifyDirection = 4,
    /// Stores an integer in the cell's remembered slot.
    Remember = 5,
}

impl Command {
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    /// Kind the paired modify expression must produce, if the command has one.
    pub const fn argument_kind(self) -> Option<ValueKind> {
        match self {
            Command::ModifyAcceleration => Some(ValueKind::Acceleration),
            Command::ModifyDirection => Some(ValueKind::Direction),
            Command::Remember => Some(ValueKind::Integer),
            Command::NoOp | Command::KillSnake | Command::StopSnake => None,
        }
    }

    /// Changes direction, acceleration or motion.
    pub const fn impacts_snake(self) -> bool {
        matches!(
            self,
            Command::ModifyAcceleration | Command::ModifyDirection | Command::StopSnake
        )
    }

    pub const fn is_dangerous(self) -> bool {
        matches!(self, Command::KillSnake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_modifying_commands_take_arguments() {
        let with_argument: Vec<_> = Command::iter()
            .filter(|c| c.argument_kind().is_some())
            .collect();
        assert_eq!(
            with_argument,
            vec![
                Command::ModifyAcceleration,
                Command::ModifyDirection,
                Command::Remember
            ]
        );
    }

    #[test]
    fn kill_is_the_only_dangerous_command() {
        for command in Command::iter() {
            assert_eq!(command.is_dangerous(), command == Command::KillSnake);
        }
        assert!(!Command::Remember.impacts_snake());
        assert!(Command::StopSnake.impacts_snake());
    }

    #[test]
    fn words_round_trip() {
        for command in Command::iter() {
            assert_eq!(Command::from_word(command.word()), Some(command));
        }
        assert_eq!(Command::from_word(6), None);
        assert_eq!("KillSnake".parse::<Command>(), Ok(Command::KillSnake));
    }
}
