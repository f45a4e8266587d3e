use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::InvalidDifficulty(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Difficulty;
    use crate::domain::DomainError;

    #[test]
    fn parses_known_levels() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn rejects_unknown_level() {
        let err = "extreme"
            .parse::<Difficulty>()
            .expect_err("unknown difficulty should be rejected");

        assert_eq!(err, DomainError::InvalidDifficulty("extreme".to_string()));
    }
}
