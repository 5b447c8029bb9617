use std::{
    fmt::Display,
    io::{self, Write},
};

use crate::Decluttered;

impl Decluttered<'_> {
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        for line in self.lines.iter() {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()
    }
}

impl Display for Decluttered<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            f.write_str(line)?;
        }

        Ok(())
    }
}
