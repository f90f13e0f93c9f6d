// Replacement templates
// Expands a template against the captures of a match: `&` and `\1`..`\9`
// splice captured text, `\u \l` adjust the case of the next character, and
// `\U \L`..`\E` open and close case-conversion spans.

use thiserror::Error;

use crate::exec::MatchResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubstituteError {
    #[error("substitution output exceeds {capacity} bytes")]
    OutputTooLong { capacity: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CaseMode {
    Upper,
    Lower,
}

struct Out {
    buf: Vec<u8>,
    capacity: usize,
    /// Case applied to the single next byte (`\u` / `\l`).
    pending: Option<CaseMode>,
    /// Case applied until `\E` (`\U` / `\L`).
    mode: Option<CaseMode>,
}

impl Out {
    fn push_byte(&mut self, byte: u8) -> Result<(), SubstituteError> {
        if self.buf.len() >= self.capacity {
            return Err(SubstituteError::OutputTooLong {
                capacity: self.capacity,
            });
        }
        let byte = match self.pending.take().or(self.mode) {
            Some(CaseMode::Upper) => byte.to_ascii_uppercase(),
            Some(CaseMode::Lower) => byte.to_ascii_lowercase(),
            None => byte,
        };
        self.buf.push(byte);
        Ok(())
    }

    fn push_group(
        &mut self,
        result: &MatchResult,
        source: &str,
        group: usize,
    ) -> Result<(), SubstituteError> {
        // a group that did not participate inserts nothing
        let Some(text) = result.captures.group_text(group, source) else {
            return Ok(());
        };
        for &b in text.as_bytes() {
            self.push_byte(b)?;
        }
        Ok(())
    }
}

/// Expand `template` using the captures `result` recorded over `source`.
/// Output longer than `max_out` bytes is an error rather than a truncation.
pub fn substitute(
    result: &MatchResult,
    source: &str,
    template: &str,
    max_out: usize,
) -> Result<String, SubstituteError> {
    let mut out = Out {
        buf: Vec::new(),
        capacity: max_out,
        pending: None,
        mode: None,
    };

    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        i += 1;
        if b == b'&' {
            out.push_group(result, source, 0)?;
            continue;
        }
        if b != b'\\' {
            out.push_byte(b)?;
            continue;
        }
        let Some(&esc) = bytes.get(i) else {
            // trailing backslash stands for itself
            out.push_byte(b'\\')?;
            break;
        };
        i += 1;
        match esc {
            b'0'..=b'9' => out.push_group(result, source, (esc - b'0') as usize)?,
            b'u' => out.pending = Some(CaseMode::Upper),
            b'l' => out.pending = Some(CaseMode::Lower),
            b'U' => out.mode = Some(CaseMode::Upper),
            b'L' => out.mode = Some(CaseMode::Lower),
            b'E' | b'e' => out.mode = None,
            b't' => out.push_byte(b'\t')?,
            b'n' => out.push_byte(b'\n')?,
            b'r' => out.push_byte(b'\r')?,
            b'f' => out.push_byte(0x0c)?,
            b'v' => out.push_byte(0x0b)?,
            b'a' => out.push_byte(0x07)?,
            other => out.push_byte(other)?,
        }
    }

    Ok(String::from_utf8(out.buf)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}
