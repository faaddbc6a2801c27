/// Selection and scroll position over the issue list.
///
/// `offset <= selected` holds whenever the list is non-empty; an empty list
/// has nothing selected and a zero offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    selected: usize,
    offset: usize,
}

impl ViewState {
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.selected.min(len - 1))
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn move_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn jump_top(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn jump_bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index;
        self.clamp(len);
    }

    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
            return;
        }
        self.selected = self.selected.min(len - 1);
        self.offset = self.offset.min(self.selected);
    }

    /// Re-clamps the window to `rows` visible list rows so the selection stays
    /// on screen.
    pub fn fit(&mut self, len: usize, rows: usize) {
        self.clamp(len);
        self.offset = scroll_into_view(self.selected, self.offset, len, rows);
    }

    pub fn visible_range(&self, len: usize, rows: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        let end = start.saturating_add(rows).min(len);
        start..end
    }
}

pub fn scroll_into_view(selected: usize, offset: usize, count: usize, rows: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let selected = selected.min(count - 1);
    let mut offset = offset;
    if rows == 0 || selected < offset {
        offset = selected;
    } else if selected >= offset + rows {
        offset += selected + 1 - (offset + rows);
    }
    offset.min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::{ViewState, scroll_into_view};

    #[test]
    fn advances_offset_by_overshoot() {
        assert_eq!(scroll_into_view(5, 0, 20, 5), 1);
        assert_eq!(scroll_into_view(9, 0, 20, 5), 5);
        assert_eq!(scroll_into_view(4, 0, 20, 5), 0);
    }

    #[test]
    fn snaps_offset_up_to_selection() {
        assert_eq!(scroll_into_view(2, 6, 20, 5), 2);
    }

    #[test]
    fn clamps_offset_for_empty_and_tiny_windows() {
        assert_eq!(scroll_into_view(0, 7, 0, 5), 0);
        assert_eq!(scroll_into_view(3, 0, 10, 0), 3);
        assert_eq!(scroll_into_view(30, 0, 10, 4), 6);
    }

    #[test]
    fn navigation_keeps_selection_inside_window() {
        let moves = [
            'j', 'j', 'j', 'j', 'j', 'j', 'G', 'k', 'k', 'g', 'j', 'G', 'k', 'j', 'j',
        ];
        for len in 0..12usize {
            for rows in 1..6usize {
                let mut view = ViewState::default();
                for step in moves {
                    match step {
                        'j' => view.move_down(len),
                        'k' => view.move_up(),
                        'g' => view.jump_top(),
                        _ => view.jump_bottom(len),
                    }
                    view.fit(len, rows);

                    match view.selected(len) {
                        None => {
                            assert_eq!(len, 0);
                            assert_eq!(view.offset(), 0);
                        }
                        Some(selected) => {
                            assert!(selected < len);
                            assert!(view.offset() <= selected);
                            assert!(selected < view.offset() + rows);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn shrinking_list_and_row_budget_keep_selection_visible() {
        let mut view = ViewState::default();
        view.select(15, 20);
        view.fit(20, 10);
        assert_eq!(view.offset(), 6);

        view.fit(20, 3);
        assert_eq!(view.offset(), 13);
        assert_eq!(view.visible_range(20, 3), 13..16);

        view.fit(4, 3);
        assert_eq!(view.selected(4), Some(3));
        assert!(view.offset() <= 3);
        assert!(3 < view.offset() + 3);

        view.fit(0, 3);
        assert_eq!(view.selected(0), None);
        assert_eq!(view.visible_range(0, 3), 0..0);
    }
}
