use std::fmt;

/// Text for the About dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub title: String,
    pub message: String,
}

impl AboutInfo {
    pub fn current() -> Self {
        Self {
            title: format!("Timefighter {}", env!("CARGO_PKG_VERSION")),
            message: "Tap the button as many times as you can before the countdown \
                      runs out. The clock starts with your first tap."
                .into(),
        }
    }
}

impl fmt::Display for AboutInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write!(f, "{}", self.message)
    }
}
