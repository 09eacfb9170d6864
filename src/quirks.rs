//! Switches for the opcodes whose behaviour differs between chip8 interpreters.

/// The runtime configuration of the chipset.
///
/// By default:
/// - `8XY6` and `8XYE` shift `VX` in place
/// - `DXYN` drops every sprite pixel that would land outside of the display
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Shift opcodes read their source from `VY` instead of `VX`.
    pub shift_uses_vy: bool,
    /// Sprite pixels outside of the display wrap around to the opposite edge.
    pub wrap_sprites: bool,
}

impl Quirks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift_uses_vy(mut self, value: bool) -> Self {
        self.shift_uses_vy = value;
        self
    }

    pub fn with_wrap_sprites(mut self, value: bool) -> Self {
        self.wrap_sprites = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quirks() {
        let quirks = Quirks::new();
        assert!(!quirks.shift_uses_vy);
        assert!(!quirks.wrap_sprites);
        assert_eq!(quirks, Quirks::default());
    }

    #[test]
    fn test_builder() {
        let quirks = Quirks::new().with_wrap_sprites(true);
        assert!(quirks.wrap_sprites);
        assert!(!quirks.shift_uses_vy);

        let quirks = quirks.with_shift_uses_vy(true).with_wrap_sprites(false);
        assert!(quirks.shift_uses_vy);
        assert!(!quirks.wrap_sprites);
    }
}
