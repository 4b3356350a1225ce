//! Error types for the rules engine and its settings.
//!
//! `GameError`'s `Display` text is the message the player sees; every failed
//! operation also pushes it to the in-game log.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Not enough money! (need ${need}, have ${have})")]
    NotEnoughMoney { need: i64, have: i64 },

    #[error("Too tired! You need to sleep first.")]
    TooTired,

    #[error("The Hermit says: rest today. No work allowed!")]
    WorkBlocked,

    #[error("The Hermit says: rest today. No creating allowed!")]
    CreationBlocked,

    #[error("{activity} is not available in this game mode")]
    WrongVariant { activity: &'static str },

    #[error("Pick one of the cards on the table first.")]
    DrawPending,

    #[error("No cards on the table. Pay for a reading first.")]
    NoDrawPending,

    #[error("There is no card #{0} on the table.")]
    InvalidCard(usize),

    #[error("Finish the current Whac-A-Mole round first.")]
    MiniGameBusy,

    #[error("No Whac-A-Mole round is running.")]
    NoRound,

    #[error("There is no hole #{0}.")]
    InvalidHole(usize),

    #[error("Painting {0} is not where you expected.")]
    PaintingNotFound(String),

    #[error("Display wall is full!")]
    DisplayFull,

    #[error("Promotion already active for tonight!")]
    PromotionActive,

    #[error("The shop has no gift #{0}.")]
    UnknownGift(usize),

    #[error("The game is already clear. Happy Birthday!")]
    GameCleared,

    #[error("Save failed: {0}")]
    Save(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_enough_money_message() {
        let e = GameError::NotEnoughMoney { need: 200, have: 50 };
        assert_eq!(e.to_string(), "Not enough money! (need $200, have $50)");
    }

    #[test]
    fn config_error_names_field() {
        let e = ConfigError::Invalid {
            field: "slot.win_rate".into(),
            reason: "must be within 0..=1".into(),
        };
        assert!(e.to_string().contains("slot.win_rate"));
    }
}
