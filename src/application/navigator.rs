use crate::domain::ports::SharedPresenter;
use crate::domain::screen::Screen;

/// Owns the active screen and enforces that exactly one screen is active
/// at a time: a transition replaces the previous screen before the new one
/// is announced, so no two screens are ever active together.
pub struct Navigator {
    current: Screen,
    presenter: SharedPresenter,
}

impl Navigator {
    pub fn new(presenter: SharedPresenter, initial: Screen) -> Self {
        Self {
            current: initial,
            presenter,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Deactivates the previous screen and announces the new one. Returns
    /// the screen that was active before the transition.
    pub async fn transition_to(&mut self, screen: Screen) -> Screen {
        let previous = std::mem::replace(&mut self.current, screen);
        self.presenter.navigate_to(screen).await;
        previous
    }
}
