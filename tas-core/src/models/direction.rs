/// Whether the total assigned cost should be minimized or maximized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    /// Find the assignment with the smallest total cost
    #[default]
    Minimize,
    /// Find the assignment with the largest total cost
    Maximize,
}

impl Direction {
    /// Converts the "find max" flag used by request payloads
    pub fn from_maximize(maximize: bool) -> Self {
        if maximize {
            Self::Maximize
        } else {
            Self::Minimize
        }
    }

    /// Whether this is [`Direction::Maximize`]
    pub fn is_maximize(self) -> bool {
        matches!(self, Self::Maximize)
    }

    /// Returns true if `a` is a strictly better total than `b` in this direction
    pub fn prefers(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_flags() {
        assert_eq!(Direction::default(), Direction::Minimize);
        assert_eq!(Direction::from_maximize(true), Direction::Maximize);
        assert!(!Direction::from_maximize(false).is_maximize());
        assert!(Direction::Maximize.prefers(2.0, 1.0));
        assert!(Direction::Minimize.prefers(1.0, 2.0));
        assert!(!Direction::Minimize.prefers(1.0, 1.0));
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(
            serde_json::to_string(&Direction::Maximize).unwrap(),
            "\"maximize\""
        );
        assert_eq!(
            serde_json::from_str::<Direction>("\"minimize\"").unwrap(),
            Direction::Minimize
        );
    }
}
