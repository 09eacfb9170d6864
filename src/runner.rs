use crate::{
    chip8::ChipSet,
    devices::{DisplayCommands, KeyboardCommands},
    opcode::Operation,
    ProcessError,
};

/// Drives a chipset and forwards every finished frame to the display.
///
/// The runner does not keep any time, the host decides how often [`Runner::tick`] is called.
pub struct Runner<K, D>
where
    K: KeyboardCommands,
    D: DisplayCommands,
{
    chip: ChipSet<K>,
    display: D,
}

impl<K, D> Runner<K, D>
where
    K: KeyboardCommands,
    D: DisplayCommands,
{
    pub fn new(chip: ChipSet<K>, display: D) -> Self {
        Self { chip, display }
    }

    /// Will run a single cycle and redraw the display if the cycle changed it.
    pub fn tick(&mut self) -> Result<Operation, ProcessError> {
        let op = self.chip.cycle()?;

        if matches!(op, Operation::Draw) {
            /* draw the screen */
            self.display.display(self.chip.get_display());
        }

        Ok(op)
    }

    /// Will run up to `n` cycles, stopping at the first error.
    /// Returns the last operation, or `Operation::None` for `n = 0`.
    pub fn tick_n(&mut self, n: usize) -> Result<Operation, ProcessError> {
        let mut last = Operation::None;
        for _ in 0..n {
            last = self.tick()?;
        }
        Ok(last)
    }

    /// Brings the chipset back into the power on state and blanks the display.
    pub fn reset(&mut self) {
        self.chip.reset();
        self.display.clear_display();
    }

    pub fn chip(&self) -> &ChipSet<K> {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut ChipSet<K> {
        &mut self.chip
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Gives back the chipset and the display.
    pub fn into_inner(self) -> (ChipSet<K>, D) {
        (self.chip, self.display)
    }
}
