use serde::{Deserialize, Serialize};

/// The position a crossover signal asks for at the close of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    Long,
    Short,
    /// No position. Also used wherever the signal is undefined.
    #[default]
    Flat,
}

impl Position {
    /// Returns the signed exposure of the position: +1, -1 or 0.
    pub fn value(&self) -> i8 {
        match self {
            Position::Long => 1,
            Position::Short => -1,
            Position::Flat => 0,
        }
    }

    /// Returns the opposite side of the position. Flat stays flat.
    pub fn opposite(&self) -> Self {
        match self {
            Position::Long => Position::Short,
            Position::Short => Position::Long,
            Position::Flat => Position::Flat,
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.value()
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Position::Long),
            -1 => Ok(Position::Short),
            0 => Ok(Position::Flat),
            other => Err(format!("{} is not a valid position", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_signed_exposure() {
        assert_eq!(Position::Long.value(), 1);
        assert_eq!(Position::Short.value(), -1);
        assert_eq!(Position::Flat.value(), 0);
        assert_eq!(Position::default(), Position::Flat);
    }

    #[test]
    fn opposite_mirrors_direction() {
        assert_eq!(Position::Long.opposite(), Position::Short);
        assert_eq!(Position::Short.opposite(), Position::Long);
        assert_eq!(Position::Flat.opposite(), Position::Flat);
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Position::Short).unwrap(), "-1");
        let parsed: Position = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Position::Long);
        assert!(serde_json::from_str::<Position>("2").is_err());
    }
}
