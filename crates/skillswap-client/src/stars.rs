use skillswap_models::Stars;

/// Star rating widget state.
///
/// Hovering previews a value without committing it; the displayed value is
/// the preview when there is one, otherwise the committed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarPicker {
    committed: Option<Stars>,
    hovered: Option<Stars>,
}

impl StarPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_committed(stars: Stars) -> Self {
        Self {
            committed: Some(stars),
            hovered: None,
        }
    }

    pub fn select(&mut self, stars: Stars) {
        self.committed = Some(stars);
    }

    pub fn hover(&mut self, stars: Stars) {
        self.hovered = Some(stars);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn committed(&self) -> Option<Stars> {
        self.committed
    }

    pub fn hovered(&self) -> Option<Stars> {
        self.hovered
    }

    pub fn displayed(&self) -> Option<Stars> {
        self.hovered.or(self.committed)
    }

    /// Label for the displayed value, if any.
    pub fn label(&self) -> Option<&'static str> {
        self.displayed().map(Stars::label)
    }

    /// Whether star `n` of the row should render filled.
    pub fn is_lit(&self, star: Stars) -> bool {
        self.displayed().is_some_and(|shown| star <= shown)
    }
}
