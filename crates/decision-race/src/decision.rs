//! The decision value a race resolves to.

use std::fmt;
use std::str::FromStr;

/// Outcome of a pending permission request.
///
/// `Undecided` is the only non-final value; it is what a race returns when
/// no channel answered before the timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The pending action may proceed.
    Allow,
    /// The pending action is rejected.
    Deny,
    /// Explicit no-op: defer to the caller's own permission dialog.
    Terminal,
    /// No channel has answered.
    Undecided,
}

impl Decision {
    /// Whether this value ends a race. Final decisions are immutable once
    /// committed to a slot.
    pub fn is_final(self) -> bool {
        !matches!(self, Decision::Undecided)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
            Decision::Terminal => "terminal",
            Decision::Undecided => "undecided",
        };
        f.write_str(name)
    }
}

impl FromStr for Decision {
    type Err = ();

    /// Parse a wire decision. Only the three final values are recognized;
    /// `"undecided"` never appears on the wire and is rejected like any
    /// other unknown string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Decision::Allow),
            "deny" => Ok(Decision::Deny),
            "terminal" => Ok(Decision::Terminal),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finality() {
        assert!(Decision::Allow.is_final());
        assert!(Decision::Deny.is_final());
        assert!(Decision::Terminal.is_final());
        assert!(!Decision::Undecided.is_final());
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("allow".parse(), Ok(Decision::Allow));
        assert_eq!("deny".parse(), Ok(Decision::Deny));
        assert_eq!("terminal".parse(), Ok(Decision::Terminal));
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Decision::from_str("undecided").is_err());
        assert!(Decision::from_str("ALLOW").is_err());
        assert!(Decision::from_str("").is_err());
        assert!(Decision::from_str("yes").is_err());
    }

    #[test]
    fn display_round_trip_for_final_values() {
        for decision in [Decision::Allow, Decision::Deny, Decision::Terminal] {
            assert_eq!(decision.to_string().parse(), Ok(decision));
        }
    }
}
