/// Input accepted by [`GameSession::apply`](crate::GameSession::apply).
///
/// Keyboard front-ends and the search driver speak the same vocabulary, so a
/// move sequence chosen by search replays exactly like key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateClockwise,
    /// One manual drop step (+1 point).
    SoftDrop,
    /// Manual drop steps until the stone locks.
    HardDrop,
    Pause,
    /// Starts a new game; ignored unless the game is over.
    Restart,
    Quit,
}
