//! Opcode abstractions, functionality and constants.
use std::convert::{TryFrom, TryInto};

use crate::{MemoryError, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the upper twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the upper eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the upper four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the lower four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the lower eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the lower twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble in bits
const NIBBLE_SIZE: u16 = 4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up (big-endian)
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::MemoryError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # assert_eq!(
/// #    Err(MemoryError::OutOfBounds { pointer: 4, len: SPLIT_OPCODE.len() }),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, MemoryError> {
    match (data.get(pointer), data.get(pointer + 1)) {
        (Some(high), Some(low)) => Ok(Opcode::from_be_bytes([*high, *low])),
        (None, _) => Err(MemoryError::OutOfBounds {
            pointer,
            len: data.len(),
        }),
        (Some(_), None) => Err(MemoryError::OutOfBounds {
            pointer: pointer + 1,
            len: data.len(),
        }),
    }
}

/// Field extractors for the different opcode layouts.
///
/// An opcode is read as four nibbles `TXYN`, where `T` selects the opcode family.
pub trait OpcodeTrait {
    /// The opcode family `T` (bits 12 - 15)
    fn t(&self) -> usize;

    /// The address of the layout `TNNN` (bits 0 - 11)
    fn nnn(&self) -> usize;

    /// The layout `TXNN`
    /// - `X` is a register index
    /// - `NN` is a constant byte
    fn xnn(&self) -> (usize, u8);

    /// The layout `TXYN`
    /// - `X` and `Y` are register indices
    /// - `N` is a constant nibble or a sub opcode
    fn xyn(&self) -> (usize, usize, usize);

    /// The register indices of the layout `TXY_`
    fn xy(&self) -> (usize, usize);

    /// The register index of the layout `TX__`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as usize
    }

    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        (self.x(), (self & OPCODE_MASK_00FF) as u8)
    }

    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        let (x, y) = self.xy();
        (x, y, (self & OPCODE_MASK_000F) as usize)
    }

    fn xy(&self) -> (usize, usize) {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        (self.x(), ((self & MASK) >> NIBBLE_SIZE) as usize)
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE_SIZE)) as usize
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents how the program counter moves after an opcode ran.
///
/// The chipset already moved the program counter onto the following opcode before the
/// opcode is executed, all steps are relative to that position.
pub enum ProgramCounterStep {
    /// Continue with the following opcode.
    Next,
    /// Skip the following opcode.
    Skip,
    /// Run the current opcode again.
    Repeat,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by the given step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Tells the driver what a single cycle did.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The chip is stalled until a key is pressed.
    Wait,
    /// The display buffer changed and can be redrawn.
    Draw,
    /// The opcode is unknown and was skipped.
    Unknown(Opcode),
}

/// Wrapper used by the conversion macros, so that the operand types can be converted from an
/// opcode without exposing a `TryFrom<Opcode>` implementation on them.
#[repr(transparent)]
struct TryIntoHandler<T>(T);

#[inline]
fn err<T>(value: Opcode) -> Result<T, OpcodeError> {
    Err(OpcodeError::InvalidOpcode(value))
}

#[inline]
fn try_into<To, From>(val: From, value: Opcode) -> Result<To, OpcodeError>
where
    From: TryInto<TryIntoHandler<To>>,
{
    let inner: TryIntoHandler<To> = val.try_into().or_else(|_| err(value))?;
    Ok(inner.0)
}

/// Generates the `TryFrom` boilerplate for a single operand type.
macro_rules! implTryIntoInner {
    ( $type_name:ty : $type_from:ty : $inner:expr) => {
        impl TryFrom<$type_from> for TryIntoHandler<$type_name> {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                let inner = $inner(value)?;
                Ok(Self(inner))
            }
        }
    };
}

macro_rules! implTryIntoEnum {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        implTryIntoInner!(
            $type_name : $type_from :
            |value: $type_from| {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        );
    };
}

/// Operand of the layout `TNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    pub nnn: usize,
}

implTryIntoInner!(Address : Opcode : |value: Opcode| -> Result<Address, ()> {
    Ok(Address { nnn: value.nnn() })
});

/// Operand of the layout `TXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConst {
    pub x: usize,
    pub nn: u8,
}

implTryIntoInner!(RegisterConst : Opcode : |value: Opcode| -> Result<RegisterConst, ()> {
    let (x, nn) = value.xnn();
    Ok(RegisterConst { x, nn })
});

/// Operand of the layout `TXY0`, any other last nibble is invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub x: usize,
    pub y: usize,
}

implTryIntoInner!(RegisterPair : Opcode : |value: Opcode| -> Result<RegisterPair, ()> {
    match value.xyn() {
        (x, y, 0) => Ok(RegisterPair { x, y }),
        _ => Err(()),
    }
});

/// Operand of the draw opcode `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    pub n: usize,
}

implTryIntoInner!(Sprite : Opcode : |value: Opcode| -> Result<Sprite, ()> {
    let (x, y, n) = value.xyn();
    Ok(Sprite { x, y, n })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemOpcode {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

implTryIntoEnum!(SystemOpcode : Opcode :
    // 00E0
    // clear display
    0x00E0 => SystemOpcode::Clear,
    // 00EE
    // Return from sub routine => pop from stack
    0x00EE => SystemOpcode::Return,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReversed,
    ShiftLeft,
}

implTryIntoEnum!(ArithmeticOpcode : usize :
    // 8XY0
    0x0 => ArithmeticOpcode::Assign,
    // 8XY1
    0x1 => ArithmeticOpcode::Or,
    // 8XY2
    0x2 => ArithmeticOpcode::And,
    // 8XY3
    0x3 => ArithmeticOpcode::Xor,
    // 8XY4
    0x4 => ArithmeticOpcode::Add,
    // 8XY5
    0x5 => ArithmeticOpcode::Sub,
    // 8XY6
    0x6 => ArithmeticOpcode::ShiftRight,
    // 8XY7
    0x7 => ArithmeticOpcode::SubReversed,
    // 8XYE
    0xE => ArithmeticOpcode::ShiftLeft,
);

/// Operand of the `8XYT` family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

implTryIntoInner!(Arithmetic : Opcode : |value: Opcode| -> Result<Arithmetic, ()> {
    let (x, y, n) = value.xyn();
    let ops = try_into(n, value).map_err(|_| ())?;
    Ok(Arithmetic { ops, x, y })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    Pressed,
    NotPressed,
}

implTryIntoEnum!(KeyOpcode : u8 :
    // EX9E
    0x9E => KeyOpcode::Pressed,
    // EXA1
    0xA1 => KeyOpcode::NotPressed,
);

/// Operand of the `EXTT` family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub ops: KeyOpcode,
    pub x: usize,
}

implTryIntoInner!(Key : Opcode : |value: Opcode| -> Result<Key, ()> {
    let (x, nn) = value.xnn();
    let ops = try_into(nn, value).map_err(|_| ())?;
    Ok(Key { ops, x })
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implTryIntoEnum!(MiscOpcode : u8 :
    // FX07
    0x07 => MiscOpcode::GetDelayTimer,
    // FX0A
    0x0A => MiscOpcode::AwaitKeyPress,
    // FX15
    0x15 => MiscOpcode::SetDelayTimer,
    // FX18
    0x18 => MiscOpcode::SetSoundTimer,
    // FX1E
    0x1E => MiscOpcode::AddVxToI,
    // FX29
    0x29 => MiscOpcode::SetIToSprite,
    // FX33
    0x33 => MiscOpcode::StoreBCD,
    // FX55
    0x55 => MiscOpcode::StoreV0ToVx,
    // FX65
    0x65 => MiscOpcode::FillV0ToVx,
);

/// Operand of the `FXTT` family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

implTryIntoInner!(Misc : Opcode : |value: Opcode| -> Result<Misc, ()> {
    let (x, nn) = value.xnn();
    let ops = try_into(nn, value).map_err(|_| ())?;
    Ok(Misc { ops, x })
});

/// A fully decoded opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`, `00EE`
    System(SystemOpcode),
    /// `1NNN`
    Jump(Address),
    /// `2NNN`
    Call(Address),
    /// `3XNN`
    SkipEqual(RegisterConst),
    /// `4XNN`
    SkipNotEqual(RegisterConst),
    /// `5XY0`
    SkipRegisterEqual(RegisterPair),
    /// `6XNN`
    SetConst(RegisterConst),
    /// `7XNN`
    AddConst(RegisterConst),
    /// `8XYT`
    Arithmetic(Arithmetic),
    /// `9XY0`
    SkipRegisterNotEqual(RegisterPair),
    /// `ANNN`
    SetIndex(Address),
    /// `BNNN`
    JumpOffset(Address),
    /// `CXNN`
    Random(RegisterConst),
    /// `DXYN`
    Draw(Sprite),
    /// `EXTT`
    Key(Key),
    /// `FXTT`
    Misc(Misc),
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let res = match value.t() {
            0x0 => Instruction::System(try_into(value, value)?),
            0x1 => Instruction::Jump(try_into(value, value)?),
            0x2 => Instruction::Call(try_into(value, value)?),
            0x3 => Instruction::SkipEqual(try_into(value, value)?),
            0x4 => Instruction::SkipNotEqual(try_into(value, value)?),
            0x5 => Instruction::SkipRegisterEqual(try_into(value, value)?),
            0x6 => Instruction::SetConst(try_into(value, value)?),
            0x7 => Instruction::AddConst(try_into(value, value)?),
            0x8 => Instruction::Arithmetic(try_into(value, value)?),
            0x9 => Instruction::SkipRegisterNotEqual(try_into(value, value)?),
            0xA => Instruction::SetIndex(try_into(value, value)?),
            0xB => Instruction::JumpOffset(try_into(value, value)?),
            0xC => Instruction::Random(try_into(value, value)?),
            0xD => Instruction::Draw(try_into(value, value)?),
            0xE => Instruction::Key(try_into(value, value)?),
            0xF => Instruction::Misc(try_into(value, value)?),
            _ => return err(value),
        };
        Ok(res)
    }
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// The dispatch in [`calc`](ChipOpcodes::calc) only matches the decoded instruction and hands
/// it to the handler, all the state lives in the implementor. This trait requires the
/// implementation of the [`ProgramCounter`](ProgramCounter) trait for moving the program
/// counter after the handler ran.
pub trait ChipOpcodes: ProgramCounter {
    /// will run a single decoded instruction
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::System(opcode) => self.system(opcode).map(step_op),
            Instruction::Jump(opcode) => self.jump(opcode),
            Instruction::Call(opcode) => self.call(opcode),
            Instruction::SkipEqual(opcode) => self.skip_equal(opcode),
            Instruction::SkipNotEqual(opcode) => self.skip_not_equal(opcode),
            Instruction::SkipRegisterEqual(opcode) => self.skip_register_equal(opcode),
            Instruction::SetConst(opcode) => self.set_const(opcode),
            Instruction::AddConst(opcode) => self.add_const(opcode),
            Instruction::Arithmetic(opcode) => self.arithmetic(opcode),
            Instruction::SkipRegisterNotEqual(opcode) => self.skip_register_not_equal(opcode),
            Instruction::SetIndex(opcode) => self.set_index(opcode),
            Instruction::JumpOffset(opcode) => self.jump_offset(opcode),
            Instruction::Random(opcode) => self.random(opcode),
            Instruction::Draw(opcode) => self.draw(opcode).map(step_op),
            Instruction::Key(opcode) => self.key(opcode),
            Instruction::Misc(opcode) => self.misc(opcode).map(step_op),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(
        &mut self,
        opcode: &SystemOpcode,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_equal(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_not_equal(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_register_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when the sum exceeds `255`, and to `0` otherwise.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `1` when `VX > VY`, and to `0` otherwise.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `1` when `VY > VX`, and to `0` otherwise.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_register_not_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte masked with `NN`.
    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`. The opcode repeats itself until a key is down.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for the character in `VX`.
    /// - `FX33` - BCD      - `246 / 100 => 2` `246 / 10 => 24 % 10 => 4` `246 % 10 => 6` - Stores the hundreds, tens and ones digit of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`, then moves `I` past the last written byte.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) from memory starting at address `I`, then moves `I` past the last read byte.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    #[test]
    fn test_build_opcode_out_of_bounds() {
        let data = [0x12, 0x34, 0x56];
        assert_eq!(build_opcode(&data, 0), Ok(0x1234));
        assert_eq!(
            build_opcode(&data, 2),
            Err(MemoryError::OutOfBounds { pointer: 3, len: 3 })
        );
        assert_eq!(
            build_opcode(&data, 7),
            Err(MemoryError::OutOfBounds { pointer: 7, len: 3 })
        );
    }

    #[test]
    fn test_xy() {
        let opcode: Opcode = 0x8AB4;
        assert_eq!(opcode.x(), 0xA);
        assert_eq!(opcode.xy(), (0xA, 0xB));
    }

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Instruction::System(SystemOpcode::Clear)));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let reg_const = RegisterConst { x: 0x1, nn: 0x23 };
        let pair = RegisterPair { x: 0x1, y: 0x2 };
        let arithmetic = |ops| Instruction::Arithmetic(Arithmetic { ops, x: 0x1, y: 0x2 });
        let misc = |ops| Instruction::Misc(Misc { ops, x: 0x0 });

        let tests = [
            (0x00E0, Ok(Instruction::System(SystemOpcode::Clear))),
            (0x00EE, Ok(Instruction::System(SystemOpcode::Return))),
            (0x00E1, Err(())),
            (0x0123, Err(())),
            (0x1919, Ok(Instruction::Jump(Address { nnn: 0x919 }))),
            (0x2222, Ok(Instruction::Call(Address { nnn: 0x222 }))),
            (0x3123, Ok(Instruction::SkipEqual(reg_const))),
            (0x4123, Ok(Instruction::SkipNotEqual(reg_const))),
            (0x5120, Ok(Instruction::SkipRegisterEqual(pair))),
            (0x5121, Err(())),
            (0x6123, Ok(Instruction::SetConst(reg_const))),
            (0x7123, Ok(Instruction::AddConst(reg_const))),
            (0x8120, Ok(arithmetic(ArithmeticOpcode::Assign))),
            (0x8121, Ok(arithmetic(ArithmeticOpcode::Or))),
            (0x8122, Ok(arithmetic(ArithmeticOpcode::And))),
            (0x8123, Ok(arithmetic(ArithmeticOpcode::Xor))),
            (0x8124, Ok(arithmetic(ArithmeticOpcode::Add))),
            (0x8125, Ok(arithmetic(ArithmeticOpcode::Sub))),
            (0x8126, Ok(arithmetic(ArithmeticOpcode::ShiftRight))),
            (0x8127, Ok(arithmetic(ArithmeticOpcode::SubReversed))),
            (0x812E, Ok(arithmetic(ArithmeticOpcode::ShiftLeft))),
            (0x8128, Err(())),
            (0x9120, Ok(Instruction::SkipRegisterNotEqual(pair))),
            (0x9121, Err(())),
            (0xA222, Ok(Instruction::SetIndex(Address { nnn: 0x222 }))),
            (0xB222, Ok(Instruction::JumpOffset(Address { nnn: 0x222 }))),
            (0xC123, Ok(Instruction::Random(reg_const))),
            (
                0xD123,
                Ok(Instruction::Draw(Sprite {
                    x: 0x1,
                    y: 0x2,
                    n: 0x3,
                })),
            ),
            (
                0xE19E,
                Ok(Instruction::Key(Key {
                    ops: KeyOpcode::Pressed,
                    x: 0x1,
                })),
            ),
            (
                0xE1A1,
                Ok(Instruction::Key(Key {
                    ops: KeyOpcode::NotPressed,
                    x: 0x1,
                })),
            ),
            (0xE111, Err(())),
            (0xF007, Ok(misc(MiscOpcode::GetDelayTimer))),
            (0xF00A, Ok(misc(MiscOpcode::AwaitKeyPress))),
            (0xF015, Ok(misc(MiscOpcode::SetDelayTimer))),
            (0xF018, Ok(misc(MiscOpcode::SetSoundTimer))),
            (0xF01E, Ok(misc(MiscOpcode::AddVxToI))),
            (0xF029, Ok(misc(MiscOpcode::SetIToSprite))),
            (0xF033, Ok(misc(MiscOpcode::StoreBCD))),
            (0xF055, Ok(misc(MiscOpcode::StoreV0ToVx))),
            (0xF065, Ok(misc(MiscOpcode::FillV0ToVx))),
            (0xF0AA, Err(())),
        ];

        for (value, res) in tests.iter() {
            let value: Opcode = *value;
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, res.map_err(|_| OpcodeError::InvalidOpcode(value)));
        }
    }
}
