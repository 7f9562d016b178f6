use std::fmt;

use serde::Serialize;

use super::state::RoundSummary;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ButtonLabel {
    Start,
    Active,
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonLabel::Start => f.write_str("Start"),
            ButtonLabel::Active => f.write_str("Tap me!"),
        }
    }
}

/// Everything the session asks the screen to show.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DisplayUpdate {
    Score { score: u32 },
    TimeLeft { seconds: u64 },
    Button { label: ButtonLabel },
    RoundFinished { summary: RoundSummary },
}

impl fmt::Display for DisplayUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayUpdate::Score { score } => write!(f, "Your Score: {score}"),
            DisplayUpdate::TimeLeft { seconds } => write!(f, "Time Left: {seconds}"),
            DisplayUpdate::Button { label } => write!(f, "[ {label} ]"),
            DisplayUpdate::RoundFinished { summary } => {
                write!(f, "Time's up! Your score was: {}", summary.score)
            }
        }
    }
}

/// Receives display updates pushed by a session.
pub trait GameObserver {
    fn on_display(&mut self, update: DisplayUpdate);
}

impl<F> GameObserver for F
where
    F: FnMut(DisplayUpdate),
{
    fn on_display(&mut self, update: DisplayUpdate) {
        self(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn renders_display_text() {
        assert_eq!(DisplayUpdate::Score { score: 4 }.to_string(), "Your Score: 4");
        assert_eq!(
            DisplayUpdate::TimeLeft { seconds: 11 }.to_string(),
            "Time Left: 11"
        );
        assert_eq!(
            DisplayUpdate::Button {
                label: ButtonLabel::Active
            }
            .to_string(),
            "[ Tap me! ]"
        );

        let now = Utc::now();
        let finished = DisplayUpdate::RoundFinished {
            summary: RoundSummary {
                round_id: Uuid::new_v4(),
                score: 42,
                started_at: now,
                finished_at: now,
            },
        };
        assert_eq!(finished.to_string(), "Time's up! Your score was: 42");
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |update: DisplayUpdate| seen.push(update);
            observer.on_display(DisplayUpdate::Score { score: 1 });
        }
        assert_eq!(seen, vec![DisplayUpdate::Score { score: 1 }]);
    }
}
