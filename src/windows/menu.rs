use crate::input::{Buttons, InputState};

/// Vertical list navigated with the d-pad and confirmed with A.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<&'static str>,
    selected: usize,
}

impl Menu {
    pub fn new(items: Vec<&'static str>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Apply this frame's input. Returns the index activated with A, if any.
    pub fn handle_input(&mut self, input: &InputState) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        if input.pressed(Buttons::DOWN) {
            self.selected = (self.selected + 1) % self.items.len();
        }
        if input.pressed(Buttons::UP) {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
        input.pressed(Buttons::A).then_some(self.selected)
    }

    pub fn lines(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let marker = if i == self.selected { '>' } else { ' ' };
                format!("{marker} {item}")
            })
            .collect()
    }
}
