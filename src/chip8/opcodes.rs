use crate::{
    definitions::{cpu, display, keyboard},
    devices::KeyboardCommands,
    opcode::{
        Address, Arithmetic, ArithmeticOpcode, ChipOpcodes, Key, KeyOpcode, Misc, MiscOpcode,
        Operation, ProgramCounterStep, RegisterConst, RegisterPair, Sprite, SystemOpcode,
    },
    ProcessError,
};

use super::ChipSet;

/// The width of a single sprite row in pixels
const SPRITE_WIDTH: usize = 8;

impl<K> ChipOpcodes for ChipSet<K>
where
    K: KeyboardCommands,
{
    fn system(
        &mut self,
        opcode: &SystemOpcode,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            SystemOpcode::Clear => {
                // 00E0
                for row in self.display.iter_mut() {
                    for pixel in row.iter_mut() {
                        *pixel = false;
                    }
                }
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            SystemOpcode::Return => {
                // 00EE
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                Ok((ProgramCounterStep::Jump(pc), Operation::None))
            }
        }
    }

    fn jump(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // the program counter already points to the opcode after the call
        self.push_stack(self.program_counter)?;
        log::debug!("call {:#06X} from {:#06X}", opcode.nnn, self.program_counter);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_equal(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] == opcode.nn))
    }

    fn skip_not_equal(&self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] != opcode.nn))
    }

    fn skip_register_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] == self.registers[opcode.y],
        ))
    }

    fn set_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[opcode.x] = self.registers[opcode.x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];
        let shift_source = if self.quirks.shift_uses_vy { vy } else { vx };

        // The flag is written before the result, so with `X = F` the result wins.
        let (res, flag) = match ops {
            // 8XY0
            ArithmeticOpcode::Assign => (vy, None),
            // 8XY1
            ArithmeticOpcode::Or => (vx | vy, None),
            // 8XY2
            ArithmeticOpcode::And => (vx & vy, None),
            // 8XY3
            ArithmeticOpcode::Xor => (vx ^ vy, None),
            // 8XY4
            ArithmeticOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            // 8XY5
            ArithmeticOpcode::Sub => (vx.wrapping_sub(vy), Some((vx > vy) as u8)),
            // 8XY6
            ArithmeticOpcode::ShiftRight => (shift_source >> 1, Some(shift_source & 1)),
            // 8XY7
            ArithmeticOpcode::SubReversed => (vy.wrapping_sub(vx), Some((vy > vx) as u8)),
            // 8XYE
            ArithmeticOpcode::ShiftLeft => (shift_source << 1, Some(shift_source >> 7)),
        };

        if let Some(flag) = flag {
            self.registers[cpu::register::FLAG] = flag;
        }
        self.registers[x] = res;
        Ok(ProgramCounterStep::Next)
    }

    fn skip_register_not_equal(
        &self,
        opcode: &RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] != self.registers[opcode.y],
        ))
    }

    fn set_index(&mut self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = opcode.nnn as u16;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &Address) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn random(&mut self, opcode: &RegisterConst) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let Sprite { x, y, n } = *opcode;

        // a sprite without rows reads no memory
        let sprite = if n == 0 {
            0..0
        } else {
            self.memory_range(self.index_register as usize, n)?
        };
        let coorx = self.registers[x] as usize;
        let coory = self.registers[y] as usize;
        let wrap = self.quirks.wrap_sprites;

        let mut collision = false;

        for (i, row) in self.memory[sprite].iter().enumerate() {
            // the most significant bit is the left most pixel
            for j in 0..SPRITE_WIDTH {
                let mask = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }

                let (py, px) = (coory + i, coorx + j);
                let (py, px) = if wrap {
                    (py % display::HEIGHT, px % display::WIDTH)
                } else if py >= display::HEIGHT || px >= display::WIDTH {
                    continue;
                } else {
                    (py, px)
                };

                let pixel = &mut self.display[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        self.registers[cpu::register::FLAG] = collision as u8;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError> {
        let key = self.registers[opcode.x] as usize;
        // values past `0xF` name no key, so they count as released
        let pressed = key < keyboard::SIZE && self.keyboard.is_key_down(key);
        let step = match opcode.ops {
            // EX9E
            KeyOpcode::Pressed => ProgramCounterStep::cond(pressed),
            // EXA1
            KeyOpcode::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let Misc { ops, x } = *opcode;
        let mut op = Operation::None;
        let mut pcs = ProgramCounterStep::Next;
        match ops {
            MiscOpcode::GetDelayTimer => {
                // FX07
                self.registers[x] = self.get_delay_timer();
            }
            MiscOpcode::AwaitKeyPress => {
                // FX0A
                // the lowest key wins if multiple are held down
                let keyboard = &self.keyboard;
                match (0..keyboard::SIZE).find(|key| keyboard.is_key_down(*key)) {
                    Some(key) => self.registers[x] = key as u8,
                    None => {
                        op = Operation::Wait;
                        pcs = ProgramCounterStep::Repeat;
                    }
                }
            }
            MiscOpcode::SetDelayTimer => {
                // FX15
                self.delay_timer.set_value(self.registers[x]);
            }
            MiscOpcode::SetSoundTimer => {
                // FX18
                self.sound_timer.set_value(self.registers[x]);
            }
            MiscOpcode::AddVxToI => {
                // FX1E
                // VF is not affected
                self.index_register = self
                    .index_register
                    .wrapping_add(self.registers[x] as u16);
            }
            MiscOpcode::SetIToSprite => {
                // FX29
                let glyph = self.registers[x] as usize * display::fontset::GLYPH_SIZE;
                self.index_register = (display::fontset::LOCATION + glyph) as u16;
            }
            MiscOpcode::StoreBCD => {
                // FX33
                const DIGITS: usize = 3;
                let range = self.memory_range(self.index_register as usize, DIGITS)?;
                let r = self.registers[x];

                self.memory[range].copy_from_slice(&[
                    r / 100,      // 246u8 / 100 => 2
                    r / 10 % 10,  // 246u8 / 10 => 24 % 10 => 4
                    r % 10,       // 246u8 % 10 => 6
                ]);
            }
            MiscOpcode::StoreV0ToVx => {
                // FX55
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
                self.index_register = self.index_register.wrapping_add(x as u16 + 1);
            }
            MiscOpcode::FillV0ToVx => {
                // FX65
                let range = self.memory_range(self.index_register as usize, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
                self.index_register = self.index_register.wrapping_add(x as u16 + 1);
            }
        }
        Ok((pcs, op))
    }
}
