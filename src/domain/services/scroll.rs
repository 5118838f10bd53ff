#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE: u16 = 10;

/// Console scroll position. Sticks to the newest line until the operator
/// scrolls up, and re-attaches once they scroll back to the bottom.
#[derive(Default)]
pub struct Scroll {
    content_length: u16,
    viewport_length: u16,
    following: bool,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.content_length.saturating_sub(self.viewport_length);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(self.content_length.into())
            .viewport_content_length(self.viewport_length.into())
            .position(self.position.into());
    }

    pub fn is_following(&self) -> bool {
        return self.following || self.position >= self.max_position();
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1).min(self.max_position());
        self.following = false;
        self.sync_scrollbar();
    }

    pub fn up_page(&mut self) {
        for _ in 0..PAGE {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.following = self.position == self.max_position();
        self.sync_scrollbar();
    }

    pub fn down_page(&mut self) {
        for _ in 0..PAGE {
            self.down();
        }
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.following = true;
        self.sync_scrollbar();
    }

    pub fn set_state(&mut self, content_length: u16, viewport_length: u16) {
        let follow = self.is_following();
        self.content_length = content_length;
        self.viewport_length = viewport_length;

        if follow {
            self.position = self.max_position();
            self.following = true;
        } else {
            self.position = self.position.min(self.max_position());
        }
        self.sync_scrollbar();
    }
}
