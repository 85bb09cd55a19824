//! Console input/output
//!
//! The builtins read from and write to the active [`Console`], a per-thread
//! pair of streams that defaults to the process stdin/stdout. Embedders and
//! tests swap it with [`install_console`].
//!
//! Reads block until data or end of input. I/O failures are never turned
//! into error values: each reader returns whatever it collected, and the
//! failure is only logged.

use super::{expect_args, BuiltinError};
use crate::value::Value;
use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Write};

/// Input and output streams used by the console builtins
pub struct Console {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Console {
    pub fn new(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Console {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Process stdin (buffered) and stdout
    pub fn stdio() -> Self {
        Console::new(BufReader::new(io::stdin()), io::stdout())
    }
}

thread_local! {
    // `None` until first use, then the stdio console unless one was installed.
    static CONSOLE: RefCell<Option<Console>> = const { RefCell::new(None) };
}

/// Make `console` the active console for this thread; returns the previous one.
pub fn install_console(console: Console) -> Console {
    CONSOLE.with(|cell| {
        cell.borrow_mut()
            .replace(console)
            .unwrap_or_else(Console::stdio)
    })
}

/// Go back to the process stdin/stdout.
pub fn reset_console() {
    CONSOLE.with(|cell| *cell.borrow_mut() = None);
}

fn with_console<R>(f: impl FnOnce(&mut Console) -> R) -> R {
    CONSOLE.with(|cell| {
        let mut slot = cell.borrow_mut();
        f(slot.get_or_insert_with(Console::stdio))
    })
}

fn ignore_io_error(operation: &'static str, result: io::Result<()>) {
    if let Err(err) = result {
        tracing::debug!(operation, error = %err, "console I/O error ignored");
    }
}

// ============================================================================
// Output
// ============================================================================

/// Print each argument, nothing in between
pub fn print(args: &[Value]) -> Result<Value, BuiltinError> {
    emit(args, b"");
    Ok(Value::Nil)
}

/// Print each argument followed by a newline
pub fn println(args: &[Value]) -> Result<Value, BuiltinError> {
    emit(args, b"\n");
    Ok(Value::Nil)
}

fn emit(args: &[Value], terminator: &[u8]) {
    with_console(|console| {
        let out = &mut console.output;
        let result = args
            .iter()
            .try_for_each(|arg| {
                write_value(out, arg)?;
                out.write_all(terminator)
            })
            .and_then(|()| out.flush());
        ignore_io_error("write", result);
    });
}

/// Strings go out as raw bytes; everything else through Display.
fn write_value(out: &mut dyn Write, value: &Value) -> io::Result<()> {
    match value {
        Value::String(s) => out.write_all(s),
        other => write!(out, "{}", other),
    }
}

// ============================================================================
// Input
// ============================================================================

/// Read one line, without its terminator. Empty string at end of input.
pub fn readln(args: &[Value]) -> Result<Value, BuiltinError> {
    expect_args::<0>(args)?;
    let mut line = Vec::new();
    with_console(|console| {
        let result = console.input.read_until(b'\n', &mut line).map(drop);
        ignore_io_error("readln", result);
    });
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Value::string(line))
}

/// Read one whitespace-delimited token.
pub fn read(args: &[Value]) -> Result<Value, BuiltinError> {
    expect_args::<0>(args)?;
    let mut token = Vec::new();
    with_console(|console| ignore_io_error("read", read_token(&mut *console.input, &mut token)));
    Ok(Value::string(token))
}

/// Read a single character.
pub fn readc(args: &[Value]) -> Result<Value, BuiltinError> {
    expect_args::<0>(args)?;
    let mut bytes = Vec::with_capacity(4);
    with_console(|console| ignore_io_error("readc", read_char(&mut *console.input, &mut bytes)));
    Ok(Value::string(bytes))
}

/// Read until end of input.
pub fn readall(args: &[Value]) -> Result<Value, BuiltinError> {
    expect_args::<0>(args)?;
    let mut content = Vec::new();
    with_console(|console| {
        let result = console.input.read_to_end(&mut content).map(drop);
        ignore_io_error("readall", result);
    });
    Ok(Value::string(content))
}

/// Skip leading whitespace, then collect bytes up to the next whitespace byte,
/// which is consumed. Stops quietly at end of input.
fn read_token(input: &mut dyn BufRead, token: &mut Vec<u8>) -> io::Result<()> {
    loop {
        let buf = match input.fill_buf() {
            Ok(buf) => buf,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if buf.is_empty() {
            return Ok(());
        }

        let mut used = 0;
        let mut delimited = false;
        for &byte in buf {
            used += 1;
            if byte.is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                delimited = true;
                break;
            }
            token.push(byte);
        }
        input.consume(used);
        if delimited {
            return Ok(());
        }
    }
}

/// Read one UTF-8 encoded character. A byte that cannot start a sequence,
/// or a sequence cut short, is returned as far as it got.
fn read_char(input: &mut dyn BufRead, out: &mut Vec<u8>) -> io::Result<()> {
    let lead = match peek_byte(input)? {
        Some(byte) => byte,
        None => return Ok(()),
    };
    input.consume(1);
    out.push(lead);

    for _ in 1..utf8_width(lead) {
        match peek_byte(input)? {
            Some(byte) if byte & 0xC0 == 0x80 => {
                input.consume(1);
                out.push(byte);
            }
            _ => break,
        }
    }
    Ok(())
}

fn peek_byte(input: &mut dyn BufRead) -> io::Result<Option<u8>> {
    loop {
        match input.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}
