//! Error types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("deck is missing cards")]
    IncompleteDeck,

    #[error("deck contains duplicate card")]
    DuplicateCard,

    /// War needs at least two players.
    #[error("not enough players")]
    NotEnoughPlayers,

    /// A standard deck cannot give every player at least one card.
    #[error("too many players for one deck")]
    TooManyPlayers,

    /// The hand already holds cards; dealing is only valid once.
    #[error("hand has already been dealt")]
    Redeal,

    #[error("game over")]
    GameOver,
}
