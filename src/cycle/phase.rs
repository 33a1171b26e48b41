use serde::{Deserialize, Serialize};

/// Where the host is in the onboarding/cycle lifecycle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Onboarding,
    Ready,
    Processing,
    Completed,
}

impl Phase {
    /// Edges of the phase machine. `Onboarding` is never re-entered.
    pub fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Self::Onboarding, Self::Ready)
                | (Self::Ready | Self::Completed, Self::Processing)
                | (Self::Processing, Self::Ready | Self::Completed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Phase; 4] = [
        Phase::Onboarding,
        Phase::Ready,
        Phase::Processing,
        Phase::Completed,
    ];

    #[test]
    fn allowed_edges_are_exactly_the_lifecycle() {
        let allowed: Vec<(Phase, Phase)> = ALL
            .iter()
            .flat_map(|from| ALL.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();

        assert_eq!(
            allowed,
            vec![
                (Phase::Onboarding, Phase::Ready),
                (Phase::Ready, Phase::Processing),
                (Phase::Processing, Phase::Ready),
                (Phase::Processing, Phase::Completed),
                (Phase::Completed, Phase::Processing),
            ]
        );
    }

    #[test]
    fn onboarding_is_never_reentered() {
        for from in ALL {
            assert!(!from.can_transition_to(Phase::Onboarding));
        }
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(Phase::Processing.to_string(), "processing");
        assert_eq!(serde_json::to_string(&Phase::Completed).unwrap(), "\"completed\"");
    }
}
