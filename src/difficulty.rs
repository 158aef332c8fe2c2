use error_chain::bail;
use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::units::SideLength;

/// The player facing choice of maze size.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Difficulty {
    Easy,
    Tricky,
    SuperChallenge,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy,
                                      Difficulty::Tricky,
                                      Difficulty::SuperChallenge];

    pub fn side_length(self) -> SideLength {
        match self {
            Difficulty::Easy => SideLength(10),
            Difficulty::Tricky => SideLength(15),
            Difficulty::SuperChallenge => SideLength(20),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy Peasy!",
            Difficulty::Tricky => "Getting Tricky!",
            Difficulty::SuperChallenge => "Super Challenge!",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let SideLength(n) = self.side_length();
        write!(f, "{}x{} ({})", n, n, self.label())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "10" => Ok(Difficulty::Easy),
            "tricky" | "15" => Ok(Difficulty::Tricky),
            "super" | "20" => Ok(Difficulty::SuperChallenge),
            _ => bail!(ErrorKind::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn sizes() {
        let sides: Vec<usize> = Difficulty::ALL.iter().map(|d| d.side_length().0).collect();
        assert_eq!(sides, vec![10, 15, 20]);
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }

    #[test]
    fn parsing() {
        assert_eq!("easy".parse::<Difficulty>().ok(), Some(Difficulty::Easy));
        assert_eq!("Tricky".parse::<Difficulty>().ok(), Some(Difficulty::Tricky));
        assert_eq!("super".parse::<Difficulty>().ok(), Some(Difficulty::SuperChallenge));
        assert_eq!("20".parse::<Difficulty>().ok(), Some(Difficulty::SuperChallenge));
        match "impossible".parse::<Difficulty>() {
            Err(Error(ErrorKind::UnknownDifficulty(ref name), _)) => assert_eq!(name, "impossible"),
            other => panic!("expected UnknownDifficulty, got {:?}", other),
        }
    }

    #[test]
    fn unknown_difficulty_message_lists_the_choices() {
        let err = "hard".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(),
                   "unknown difficulty 'hard', expected easy, tricky or super");
    }

    #[test]
    fn display() {
        assert_eq!(Difficulty::Tricky.to_string(), "15x15 (Getting Tricky!)");
    }
}
