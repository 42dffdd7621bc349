// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

/// What the suggestion panel shows.
///
/// `cursor` is [None] (nothing highlighted) or a valid index into `items`. Every method
/// that changes `items` resets it.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct SuggestionState {
    pub items: Vec<Value>,
    pub cursor: Option<usize>,
    pub is_loading: bool,
    pub is_open: bool,
}

impl SuggestionState {
    pub fn set_items(&mut self, items: Vec<Value>) {
        self.items = items;
        self.cursor = None;
    }

    pub fn clear_items(&mut self) { self.set_items(vec![]); }

    /// Hides the panel. The items are kept.
    pub fn close(&mut self) {
        self.is_open = false;
        self.cursor = None;
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&Value> { self.items.get(self.cursor?) }

    /// Past the last item wraps to the first.
    pub fn move_down(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(index) if index + 1 < len => index + 1,
            _ => 0,
        });
    }

    /// Before the first item wraps to the last.
    pub fn move_up(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.cursor = Some(match self.cursor {
            Some(index) if index > 0 => index - 1,
            _ => len - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::assert_eq2;

    fn three_items() -> SuggestionState {
        let mut state = SuggestionState::default();
        state.set_items(vec![json!("a"), json!("b"), json!("c")]);
        state
    }

    #[test]
    fn test_move_down_wraps() {
        let mut state = three_items();
        let mut seen = vec![];
        for _ in 0..4 {
            state.move_down();
            seen.push(state.cursor);
        }
        assert_eq2!(seen, vec![Some(0), Some(1), Some(2), Some(0)]);
    }

    #[test]
    fn test_move_up_wraps() {
        let mut state = three_items();
        state.move_up();
        assert_eq2!(state.cursor, Some(2));
        state.move_up();
        state.move_up();
        assert_eq2!(state.cursor, Some(0));
        state.move_up();
        assert_eq2!(state.cursor, Some(2));
    }

    #[test]
    fn test_no_items_means_no_cursor() {
        let mut state = SuggestionState::default();
        state.move_down();
        state.move_up();
        assert_eq2!(state.cursor, None);
        assert_eq2!(state.highlighted(), None);
    }

    #[test]
    fn test_set_items_resets_cursor() {
        let mut state = three_items();
        state.move_down();
        state.move_down();
        assert_eq2!(state.highlighted(), Some(&json!("b")));
        state.set_items(vec![json!("z")]);
        assert_eq2!(state.cursor, None);
    }
}
