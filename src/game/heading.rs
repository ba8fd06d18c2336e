use serde::{Deserialize, Serialize};

/// Compass heading of the snake, cyclic in the order N -> E -> S -> W -> N
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// All headings in clockwise order
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    fn from_index(index: isize) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Returns the heading after applying a relative turn
    pub fn turned(self, turn: Turn) -> Self {
        let step = match turn {
            Turn::Left => -1,
            Turn::Right => 1,
        };
        Self::from_index(self.index() as isize + step)
    }

    /// Returns the delta (dx, dy) for one step in this heading.
    ///
    /// North is +y: the grid origin sits at the bottom-left corner.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        }
    }
}

/// Relative turn applied to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

/// Logical command delivered by an input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnLeft,
    TurnRight,
    PauseToggle,
    Reset,
}

impl From<Turn> for Command {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Left => Command::TurnLeft,
            Turn::Right => Command::TurnRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_turns_are_clockwise() {
        assert_eq!(Heading::North.turned(Turn::Right), Heading::East);
        assert_eq!(Heading::East.turned(Turn::Right), Heading::South);
        assert_eq!(Heading::South.turned(Turn::Right), Heading::West);
        assert_eq!(Heading::West.turned(Turn::Right), Heading::North);
    }

    #[test]
    fn test_left_turns_wrap_from_north() {
        // Index 0 must wrap to West, not fall through to a default
        assert_eq!(Heading::North.turned(Turn::Left), Heading::West);
        assert_eq!(Heading::West.turned(Turn::Left), Heading::South);
        assert_eq!(Heading::South.turned(Turn::Left), Heading::East);
        assert_eq!(Heading::East.turned(Turn::Left), Heading::North);
    }

    #[test]
    fn test_four_turns_return_to_start() {
        for heading in Heading::ALL {
            for turn in [Turn::Left, Turn::Right] {
                let mut h = heading;
                for _ in 0..4 {
                    h = h.turned(turn);
                }
                assert_eq!(h, heading);
            }
        }
    }

    #[test]
    fn test_heading_delta() {
        assert_eq!(Heading::North.delta(), (0, 1));
        assert_eq!(Heading::South.delta(), (0, -1));
        assert_eq!(Heading::East.delta(), (1, 0));
        assert_eq!(Heading::West.delta(), (-1, 0));
    }

    #[test]
    fn test_command_from_turn() {
        assert_eq!(Command::from(Turn::Left), Command::TurnLeft);
        assert_eq!(Command::from(Turn::Right), Command::TurnRight);
    }
}
