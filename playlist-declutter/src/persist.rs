use std::{
    fs,
    io::{BufWriter, Read, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{Declutter, DeclutterError, DeclutterStats, Decluttered};

const STREAM_NAME: &str = "<stream>";

fn decode(bytes: &[u8]) -> Result<&str, DeclutterError> {
    std::str::from_utf8(bytes).map_err(|e| DeclutterError::InvalidEncoding {
        line: bytes[..e.valid_up_to()]
            .iter()
            .filter(|x| **x == b'\n')
            .count(),
    })
}

/// Write into a temporary file next to `output`, then move it over `output`
fn write_atomically(output: &Path, decluttered: &Decluttered) -> Result<(), DeclutterError> {
    let fail = |source: std::io::Error| DeclutterError::OutputWrite {
        output: output.display().to_string(),
        source,
    };

    let directory = match output.parent() {
        Some(x) if !x.as_os_str().is_empty() => x,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory).map_err(fail)?;

    let mut file = NamedTempFile::new_in(directory).map_err(fail)?;
    decluttered
        .write_to(BufWriter::new(file.as_file_mut()))
        .map_err(fail)?;
    file.as_file().sync_all().map_err(fail)?;
    file.persist(output).map_err(|e| fail(e.error))?;

    Ok(())
}

impl Declutter {
    /// Read a whole document from `reader` and write the result to `writer`
    pub fn process_reader(
        &self,
        mut reader: impl Read,
        writer: impl Write,
    ) -> Result<DeclutterStats, DeclutterError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| DeclutterError::InputRead {
                input: STREAM_NAME.to_owned(),
                source,
            })?;

        let result = self.process(decode(&bytes)?);
        result
            .write_to(writer)
            .map_err(|source| DeclutterError::OutputWrite {
                output: STREAM_NAME.to_owned(),
                source,
            })?;

        Ok(result.stats)
    }

    /// Declutter `input` into `output`.
    ///
    /// `output` is replaced atomically and left untouched on any failure.
    pub fn process_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<DeclutterStats, DeclutterError> {
        let input = input.as_ref();
        let bytes = fs::read(input).map_err(|e| DeclutterError::from_read(input, e))?;

        let result = self.process(decode(&bytes)?);
        write_atomically(output.as_ref(), &result)?;

        Ok(result.stats)
    }
}
