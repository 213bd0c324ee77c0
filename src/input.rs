/// Bitmask of controller buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Buttons(pub u64);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const A: Buttons = Buttons(1 << 0);
    pub const B: Buttons = Buttons(1 << 1);
    pub const X: Buttons = Buttons(1 << 2);
    pub const Y: Buttons = Buttons(1 << 3);
    pub const L: Buttons = Buttons(1 << 6);
    pub const R: Buttons = Buttons(1 << 7);
    pub const ZL: Buttons = Buttons(1 << 8);
    pub const ZR: Buttons = Buttons(1 << 9);
    pub const LEFT: Buttons = Buttons(1 << 12);
    pub const UP: Buttons = Buttons(1 << 13);
    pub const RIGHT: Buttons = Buttons(1 << 14);
    pub const DOWN: Buttons = Buttons(1 << 15);

    pub fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Buttons) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

/// Parse a button name like `"a"`, `"zr"` or `"down"`.
pub fn parse_button(s: &str) -> Option<Buttons> {
    match s.trim().to_ascii_uppercase().as_str() {
        "A" => Some(Buttons::A),
        "B" => Some(Buttons::B),
        "X" => Some(Buttons::X),
        "Y" => Some(Buttons::Y),
        "L" => Some(Buttons::L),
        "R" => Some(Buttons::R),
        "ZL" => Some(Buttons::ZL),
        "ZR" => Some(Buttons::ZR),
        "LEFT" => Some(Buttons::LEFT),
        "UP" => Some(Buttons::UP),
        "RIGHT" => Some(Buttons::RIGHT),
        "DOWN" => Some(Buttons::DOWN),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: u32,
    pub y: u32,
}

/// Input sampled once per active frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Buttons currently held.
    pub held: Buttons,
    /// Buttons that went down since the previous sample.
    pub down: Buttons,
    /// Single touch contact, if exactly one finger is on the screen.
    pub touch: Option<TouchPoint>,
}

impl InputState {
    pub fn pressed(&self, button: Buttons) -> bool {
        self.down.contains(button)
    }

    /// Shoulder buttons move focus forward.
    pub fn focus_next(&self) -> bool {
        self.down.intersects(Buttons::R | Buttons::ZR)
    }

    pub fn focus_prev(&self) -> bool {
        self.down.intersects(Buttons::L | Buttons::ZL)
    }
}
