//! The pretty print implementation of the [`ChipSet`](super::ChipSet), used for dumping the
//! machine state while debugging a program.

use super::*;
use crate::{definitions::cpu, definitions::keyboard, devices::KeyboardCommands};
use once_cell::sync::Lazy;
use std::fmt;

/// The amount of values printed per line.
/// As a single instruction is u16, a memory
/// line contains double the amount of bytes.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intsize {
    () => {
        6
    };
}

macro_rules! intformat {
    () => {
        // The formatted string will be 2 sysbols for the prefix (0x)
        // and 4 for the rest long.
        concat!("{:#0", intsize!(), "X}")
    };
}

const INTSIZE: usize = intsize!();

/// The length of a formatted pointer range
static POINTER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut line = String::with_capacity(20);
    // SAFETY: if formatting a constant fails panicing is correct
    pointer_print::formatter(&mut line, 0, 0).unwrap();
    line.len()
});

/// The length of a formatted integer
static INTEGER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    // SAFETY: if formatting a constant fails panicing is correct
    integer_print::formatter(&mut string, 0u8).unwrap();
    string.len()
});

/// a line length (This is a bit bigger then the actual line will be)
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::Write;

    /// will format the pointers according to definition
    pub(super) fn formatter(
        line: &mut String,
        from: usize,
        to: usize,
    ) -> Result<(), std::fmt::Error> {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{integer_print, pointer_print, HEX_PRINT_STEP};
    use crate::{
        definitions::memory,
        opcode::{self, Opcode},
    };
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The amount of bytes in a single row
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that there is at least two lines of only zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut formatted = String::new();
        // SAFETY: if formatting a constant fails panicing is correct
        integer_print::formatter(&mut formatted, 0u16).unwrap();
        match HEX_PRINT_STEP {
            1 => formatted,
            2 => format!("{} {}", formatted, formatted),
            _ => {
                let length = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
                    - FILLER_BASE.len();
                let filler = " ".repeat(length / 2);

                format!(
                    "{}{}{}{}{}",
                    formatted, filler, FILLER_BASE, filler, formatted
                )
            }
        }
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;
            res.push(' ');

            if !self.only_null {
                for entry in self.data.iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                res.pop();
            } else {
                res.push_str(&ZERO_FILLER)
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory
    /// this functions assumes the full data to be passed
    /// as the offset is calculated from the beginning of the
    /// memory block
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let data_last_index = memory.len().saturating_sub(1);
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for from in (0..memory.len()).step_by(POINTER_INCREMENT) {
            let to = (from + POINTER_INCREMENT - 1).min(data_last_index);

            let mut data = [0; HEX_PRINT_STEP];
            let mut only_null = true;

            for (entry, index) in data
                .iter_mut()
                .zip((from..=to).step_by(memory::opcodes::SIZE))
            {
                // a trailing single byte is printed as the high byte of an opcode
                *entry = opcode::build_opcode(memory, index)
                    .unwrap_or_else(|_| Opcode::from(memory[index]) << 8);
                only_null &= *entry == 0;
            }

            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            // merge consecutive zero rows
            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, super::END_OF_LINE)?;
        }
        if string.ends_with(super::END_OF_LINE) {
            string.pop();
        }
        Ok(string)
    }
}

/// handles printing of any and all of integers.
mod integer_print {
    use super::{pointer_print, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> Result<(), fmt::Error>
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);
        for i in (0..data.len()).step_by(HEX_PRINT_STEP) {
            let n = (i + HEX_PRINT_STEP - 1).min(data.len() - 1);

            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, i, n)?;

            for entry in &data[i..=n] {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(super::END_OF_LINE);
        }

        // Remove unneeded new line
        if res.ends_with(super::END_OF_LINE) {
            res.pop();
        }

        Ok(res)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use once_cell::sync::Lazy;

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// a function to keep the correct format length
    fn formatter(message: &str) -> String {
        format!("{:width$}", message, width = *super::INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    /// the offset will be calculated automatically from
    /// the data block
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, std::fmt::Error> {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);

        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for i in (0..data.len()).step_by(HEX_PRINT_STEP) {
            let n = (i + HEX_PRINT_STEP - 1).min(data.len() - 1);
            super::indent_helper(&mut res, indent);

            pointer_print::formatter(&mut res, i, n)?;
            res.push(' ');

            for value in &data[i..n] {
                res.push_str(check_type(*value));
                res.push(' ');
            }
            // Append the last missing entry
            res.push_str(check_type(data[n]).trim_end());
            res.push(END_OF_LINE);
        }
        // Remove unneeded new line
        if res.ends_with(END_OF_LINE) {
            res.pop();
        }

        Ok(res)
    }
}

/// Formats a single value indented into its own line.
fn single_value<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::Display + fmt::UpperHex + num_traits::Unsigned + Copy,
{
    let mut line = String::with_capacity(INTSIZE + INDENT_SIZE);
    indent_helper(&mut line, INDENT_SIZE);
    integer_print::formatter(&mut line, value)?;
    Ok(line)
}

impl<K> fmt::Display for ChipSet<K>
where
    K: KeyboardCommands,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opc = single_value(self.opcode)?;
        let prc = single_value(self.program_counter)?;
        let idx = single_value(self.index_register)?;
        let dlt = single_value(self.delay_timer.get_value())?;
        let sdt = single_value(self.sound_timer.get_value())?;

        let mem = opcode_print::printer(&self.memory, INDENT_SIZE)?;

        let keys: Vec<bool> = (0..keyboard::SIZE)
            .map(|key| self.keyboard.is_key_down(key))
            .collect();
        let key = bool_print::printer(&keys, INDENT_SIZE)?;

        // the stack is shown with all of its slots
        let mut stack = [0; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(&self.stack);
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;

        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tDelay Timer :\n{}\n\
                \tSound Timer :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                }}",
            opc, prc, idx, dlt, sdt, mem, key, sta, reg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use crate::definitions::keyboard;

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tOpcode :\n\
                \t\t0x0000\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tDelay Timer :\n\
                \t\t0x003C\n\
            \tSound Timer :\n\
                \t\t0x003C\n\
            \tMemory :\n\
                \t\t0x0000 - 0x000F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0010 - 0x001F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0020 - 0x002F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0030 - 0x003F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0040 - 0x004F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x0050 - 0x01FF : 0x0000                    ...                    0x0000\n\
                \t\t0x0200 - 0x020F : 0x00E0 0x6C00 0x4C00 0x6E0F 0xA203 0x6020 0xF055 0x00E0\n\
                \t\t0x0210 - 0x021F : 0x1200 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0220 - 0x0FFF : 0x0000                    ...                    0x0000\n\
            \tKeyboard :\n\
                \t\t0x0000 - 0x0007 : false  true   false  true   false  true   false  true\n\
                \t\t0x0008 - 0x000F : false  true   false  true   false  true   false  true\n\
            \tStack :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
        }";

    #[test]
    /// tests if the pretty print output is as expected
    fn test_full_print() {
        let mut chip = tests::get_default_chip();
        chip.load_program(&tests::PROGRAM).unwrap();

        let mut keys = [false; keyboard::SIZE];
        for (index, key) in keys.iter_mut().enumerate() {
            *key = index % 2 != 0;
        }
        chip.keyboard_mut().set_mult(&keys);

        let actual_full = format!("{}", chip);
        let actual_split = actual_full.split('\n');
        let expected = OUTPUT_PRINT.split('\n');

        assert_eq!(OUTPUT_PRINT.lines().count(), actual_full.lines().count());
        for (exp, act) in expected.zip(actual_split) {
            assert_eq!(exp, act);
        }
    }

    #[test]
    fn test_print_after_call() {
        let mut chip = tests::get_default_chip();
        // 2208 - call 0x208
        chip.load_program(&[0x22, 0x08]).unwrap();
        chip.cycle().unwrap();

        let print = format!("{}", chip);
        assert!(print.contains(
            "\t\t0x0000 - 0x0007 : 0x0202 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000"
        ));
        assert!(print.contains("\tProgram Counter :\n\t\t0x0208\n"));
        assert!(print.contains("\tDelay Timer :\n\t\t0x003B\n"));
    }
}
