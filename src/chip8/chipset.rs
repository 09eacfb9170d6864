use std::convert::TryFrom;

use {
    crate::{
        definitions::{cpu, display, memory, timer},
        devices::KeyboardCommands,
        opcode::{self, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        quirks::Quirks,
        timer::Timer,
        LoadError, MemoryError, ProcessError, StackError,
    },
    rand::RngCore,
    std::ops::Range,
    tinyvec::ArrayVec,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instance of the
/// Chip8 CPU.
pub struct ChipSet<K>
where
    K: KeyboardCommands,
{
    /// The last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains the font set at `0x000-0x04F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction, it
    /// is the "no borrow" flag. The shift opcodes store the shifted out bit there and in the
    /// draw instruction `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row.
    pub(super) display: [[bool; display::WIDTH]; display::HEIGHT],
    /// The source of truth for the hex keyboard, it is asked every time a key is needed.
    pub(super) keyboard: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    /// The behaviour of the ambiguous opcodes.
    pub(super) quirks: Quirks,
}

impl<K> ChipSet<K>
where
    K: KeyboardCommands,
{
    /// will create a new chipset object
    pub fn new(keyboard: K) -> Self {
        Self::with_quirks(keyboard, Quirks::default())
    }

    /// will create a new chipset object with the given quirks
    pub fn with_quirks(keyboard: K, quirks: Quirks) -> Self {
        let mut chip = Self {
            opcode: 0,
            memory: vec![0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::new(timer::START),
            sound_timer: Timer::new(timer::START),
            display: [[false; display::WIDTH]; display::HEIGHT],
            keyboard,
            rng: Box::new(rand::rngs::OsRng),
            quirks,
        };
        chip.load_font();
        chip
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    fn load_font(&mut self) {
        let font = display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len());
        self.memory[font].copy_from_slice(&display::fontset::FONTSET);
    }

    /// Will write the program into memory starting at `0x200`.
    ///
    /// Only the bytes of the program are overwritten, a program that does not fit into memory
    /// is rejected without changing anything.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), ProcessError> {
        if program.len() > cpu::PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: cpu::PROGRAM_SIZE,
            }
            .into());
        }

        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + program.len())]
            .copy_from_slice(program);
        log::debug!("loaded program with {} bytes", program.len());
        Ok(())
    }

    /// Brings the chipset back into the power on state, the loaded program is removed as well.
    pub fn reset(&mut self) {
        self.opcode = 0;
        self.memory.iter_mut().for_each(|byte| *byte = 0);
        self.load_font();
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer.set_value(timer::START);
        self.sound_timer.set_value(timer::START);
        self.display = [[false; display::WIDTH]; display::HEIGHT];
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), MemoryError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        Ok(())
    }

    /// Will advance the program by a single step.
    ///
    /// The opcode at the program counter is fetched, the counter moved on to the next opcode
    /// and both timers count down once before the opcode runs. An unknown opcode only gets
    /// reported, any other error rolls the program counter and the timers back, leaving the
    /// chipset on the failing opcode.
    pub fn cycle(&mut self) -> Result<Operation, ProcessError> {
        // import here as to not bloat the namespace
        use crate::opcode::ChipOpcodes;

        let pointer = self.program_counter;
        self.set_opcode()?;
        log::trace!("opcode {:#06X} at {:#06X}", self.opcode, pointer);

        let timers = (self.delay_timer, self.sound_timer);
        self.program_counter += memory::opcodes::SIZE;
        self.delay_timer.tick();
        self.sound_timer.tick();

        let instruction = match Instruction::try_from(self.opcode) {
            Ok(instruction) => instruction,
            Err(err) => {
                log::warn!("{} (at {:#06X})", err, pointer);
                return Ok(Operation::Unknown(self.opcode));
            }
        };

        match self.calc(&instruction) {
            Ok(operation) => Ok(operation),
            Err(err) => {
                log::error!("{} (at {:#06X})", err, pointer);
                self.program_counter = pointer;
                self.delay_timer = timers.0;
                self.sound_timer = timers.1;
                Err(err)
            }
        }
    }

    /// Will ask the keyboard if the given key is held down.
    pub fn is_key_down(&self, key: usize) -> bool {
        self.keyboard.is_key_down(key)
    }

    /// Will get the keyboard
    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Will get the keyboard, so that the driver can update it
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return a immutable slice of the current display configuration
    pub fn get_display(&self) -> &[[bool; display::WIDTH]] {
        &self.display[..]
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> u16 {
        self.index_register
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn get_stack(&self) -> &[usize] {
        &self.stack
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn get_quirks(&self) -> Quirks {
        self.quirks
    }

    /// Will push the given pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() == self.stack.capacity() {
            Err(StackError::Full)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop the last pointer from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }

    /// Checks that `len` bytes starting at `from` are inside of the memory.
    pub(super) fn memory_range(&self, from: usize, len: usize) -> Result<Range<usize>, MemoryError> {
        let to = from + len;
        if to <= self.memory.len() {
            Ok(from..to)
        } else {
            Err(MemoryError::OutOfBounds {
                pointer: to - 1,
                len: self.memory.len(),
            })
        }
    }
}

impl<K: KeyboardCommands> ProgramCounter for ChipSet<K> {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = match step {
            ProgramCounterStep::Next => self.program_counter,
            ProgramCounterStep::Skip => self.program_counter + memory::opcodes::SIZE,
            ProgramCounterStep::Repeat => self.program_counter - memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}
