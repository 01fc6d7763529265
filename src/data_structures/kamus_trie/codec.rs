// Copyright (c) 2025 Kamus Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Two-field CSV codec for dictionary files.
//!
//! Each record is one `word,meaning` line terminated by `\n`. Fields are
//! quoted only when they contain the delimiter, a double quote or a line
//! break, so plain dictionaries stay plain text. CRLF input is accepted.

use std::io::Write;

use csv_core::{ReadFieldResult, Terminator, WriteResult};

use super::error::{KamusTrieError, KamusTrieResult};

/// Scratch buffer size for the csv state machines.
const BUFFER_SIZE: usize = 4096;

/// Number of fields in every dictionary record.
const FIELDS_PER_RECORD: usize = 2;

/// Streams `word,meaning` records into a writer.
pub struct RecordWriter<W: Write> {
    inner: W,
    csv: csv_core::Writer,
    buffer: [u8; BUFFER_SIZE],
    records: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Creates a record writer on top of `inner`.
    pub fn new(inner: W) -> Self {
        let csv = csv_core::WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .build();
        Self {
            inner,
            csv,
            buffer: [0; BUFFER_SIZE],
            records: 0,
        }
    }

    /// Writes a single record.
    pub fn write_record(&mut self, word: &str, meaning: &str) -> std::io::Result<()> {
        self.write_field(word.as_bytes())?;
        let (result, nout) = self.csv.delimiter(&mut self.buffer);
        debug_assert_eq!(result, WriteResult::InputEmpty);
        self.inner.write_all(&self.buffer[..nout])?;
        self.write_field(meaning.as_bytes())?;
        let (result, nout) = self.csv.terminator(&mut self.buffer);
        debug_assert_eq!(result, WriteResult::InputEmpty);
        self.inner.write_all(&self.buffer[..nout])?;
        self.records += 1;
        Ok(())
    }

    fn write_field(&mut self, mut data: &[u8]) -> std::io::Result<()> {
        loop {
            let (result, nin, nout) = self.csv.field(data, &mut self.buffer);
            self.inner.write_all(&self.buffer[..nout])?;
            if result == WriteResult::InputEmpty {
                return Ok(());
            }
            data = &data[nin..];
        }
    }

    /// Flushes pending output and returns the number of records written.
    pub fn finish(mut self) -> std::io::Result<usize> {
        let (result, nout) = self.csv.finish(&mut self.buffer);
        debug_assert_eq!(result, WriteResult::InputEmpty);
        self.inner.write_all(&self.buffer[..nout])?;
        self.inner.flush()?;
        Ok(self.records)
    }
}

/// Decodes every `word,meaning` record in `input`.
///
/// Decoding is all-or-nothing: the first record without exactly two fields,
/// or with a field that is not UTF-8, fails the whole input. Blank lines are
/// skipped.
pub fn decode_records(mut input: &[u8]) -> KamusTrieResult<Vec<(String, String)>> {
    let mut reader = csv_core::Reader::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut field = Vec::new();
    let mut fields: Vec<Vec<u8>> = Vec::with_capacity(FIELDS_PER_RECORD);
    let mut records = Vec::new();

    loop {
        let (result, nin, nout) = reader.read_field(input, &mut buffer);
        input = &input[nin..];
        field.extend_from_slice(&buffer[..nout]);
        match result {
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                fields.push(std::mem::take(&mut field));
                if record_end {
                    let record = records.len() + 1;
                    records.push(into_record(record, std::mem::take(&mut fields))?);
                }
            }
            ReadFieldResult::End => break,
        }
    }

    tracing::debug!(records = records.len(), "Decoded dictionary records");
    Ok(records)
}

fn into_record(record: usize, fields: Vec<Vec<u8>>) -> KamusTrieResult<(String, String)> {
    let [word, meaning]: [Vec<u8>; FIELDS_PER_RECORD] =
        fields
            .try_into()
            .map_err(|fields: Vec<Vec<u8>>| KamusTrieError::MalformedRecord {
                record,
                fields: fields.len(),
            })?;

    let decode = |bytes: Vec<u8>| {
        String::from_utf8(bytes).map_err(|_| KamusTrieError::InvalidEncoding { record })
    };
    Ok((decode(word)?, decode(meaning)?))
}
