use super::direction::Direction;
use crate::settings::Percent;

/// A request from the user interface to the game engine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Intent {
    /// Steer the snake
    Turn(Direction),

    /// Pause a running game or resume a paused one
    TogglePause,

    /// Pause a running game, resume a paused one, or start over after a game
    /// over
    Confirm,

    /// Move the speed slider
    SetSpeed(Percent),

    /// Move the volume slider
    SetVolume(Percent),
}

/// Intents that change the game's phase.  These are held until the next tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Control {
    TogglePause,
    Confirm,
}

/// Single-slot buffers between the interface and the tick loop.  A newer
/// entry overwrites an older one that has not yet been consumed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct InputQueue {
    direction: Option<Direction>,
    control: Option<Control>,
}

impl InputQueue {
    pub(super) fn queue_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    pub(super) fn queue_control(&mut self, control: Control) {
        self.control = Some(control);
    }

    pub(super) fn take_direction(&mut self) -> Option<Direction> {
        self.direction.take()
    }

    pub(super) fn take_control(&mut self) -> Option<Control> {
        self.control.take()
    }

    pub(super) fn clear(&mut self) {
        *self = InputQueue::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut queue = InputQueue::default();
        queue.queue_direction(Direction::Up);
        queue.queue_direction(Direction::Left);
        queue.queue_control(Control::Confirm);
        queue.queue_control(Control::TogglePause);
        assert_eq!(queue.take_direction(), Some(Direction::Left));
        assert_eq!(queue.take_direction(), None);
        assert_eq!(queue.take_control(), Some(Control::TogglePause));
        assert_eq!(queue.take_control(), None);
    }
}
