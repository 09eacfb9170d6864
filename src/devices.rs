use crate::definitions::{display, keyboard};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will clear the display
    fn clear_display(&mut self);
    /// Will display all from the pixels, the rows are given top to bottom
    fn display(&mut self, pixels: &[[bool; display::WIDTH]]);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard state.
///
/// The chipset queries it every time an opcode needs a key, so implementations shall always
/// answer with the current state.
pub trait KeyboardCommands {
    /// Checks if the key with the given index (`0x0 - 0xF`) is currently held down.
    fn is_key_down(&self, key: usize) -> bool;
}

/// Will store the state of the internal keyboard.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Releases all the keys.
    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    /// Flips the state of the given key, keys past `0xF` are ignored.
    pub fn toggle_key(&mut self, key: usize) {
        if let Some(state) = self.keys.get_mut(key) {
            *state = !*state;
        }
    }

    /// Sets the state of the given key, keys past `0xF` are ignored.
    pub fn set_key(&mut self, key: usize, to: bool) {
        if let Some(state) = self.keys.get_mut(key) {
            *state = to;
        }
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        // copy_from_slice checks the keys length during copy
        self.keys.copy_from_slice(keys);
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }
}

impl KeyboardCommands for Keyboard {
    fn is_key_down(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}
