use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    #[serde(rename = "all-in", alias = "allin")]
    AllIn,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seat's decision.
///
/// `amount` is unused for fold and check. For raise and all-in it is the *total*
/// bet the seat ends the action with, not the increment. Once applied, a call
/// records the chips it moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub kind: ActionKind,
    #[serde(default)]
    pub amount: u64,
    pub seat: usize,
}

impl Action {
    pub const fn new(kind: ActionKind, amount: u64, seat: usize) -> Self {
        Self { kind, amount, seat }
    }

    pub const fn fold(seat: usize) -> Self {
        Self::new(ActionKind::Fold, 0, seat)
    }

    pub const fn check(seat: usize) -> Self {
        Self::new(ActionKind::Check, 0, seat)
    }

    pub const fn call(seat: usize) -> Self {
        Self::new(ActionKind::Call, 0, seat)
    }

    /// Raise so that the seat's bet this round totals `to`.
    pub const fn raise_to(seat: usize, to: u64) -> Self {
        Self::new(ActionKind::Raise, to, seat)
    }

    pub const fn all_in(seat: usize) -> Self {
        Self::new(ActionKind::AllIn, 0, seat)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Fold | ActionKind::Check => write!(f, "{}", self.kind),
            ActionKind::Call | ActionKind::Raise | ActionKind::AllIn => {
                write!(f, "{} {}", self.kind, self.amount)
            }
        }
    }
}

/// One legal option for the seat to act.
///
/// Call carries the amount to call in `min_amount`. Raise carries its
/// total-bet window. All-in has `min_amount == max_amount == stack + bet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidAction {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_amount: u64,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_amount: u64,
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

impl ValidAction {
    pub(crate) const fn bare(kind: ActionKind) -> Self {
        Self { kind, min_amount: 0, max_amount: 0 }
    }

    pub(crate) const fn ranged(kind: ActionKind, min_amount: u64, max_amount: u64) -> Self {
        Self { kind, min_amount, max_amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_amount_only_when_meaningful() {
        assert_eq!(Action::fold(2).to_string(), "FOLD");
        assert_eq!(Action::raise_to(0, 300).to_string(), "RAISE 300");
    }

    #[test]
    fn action_json_shape() {
        let a: Action = serde_json::from_str(r#"{"kind":"raise","amount":40,"seat":3}"#).unwrap();
        assert_eq!(a, Action::raise_to(3, 40));
        let a: Action = serde_json::from_str(r#"{"kind":"all-in","seat":1}"#).unwrap();
        assert_eq!(a.kind, ActionKind::AllIn);
        let v = ValidAction::bare(ActionKind::Check);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"{"kind":"check"}"#);
    }
}
