//! `tracing` output routed to the browser console.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsValue;

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: &str) {
    let (filter, unknown) = match level.parse::<LevelFilter>() {
        Ok(filter) => (filter, false),
        Err(_) => (LevelFilter::INFO, true),
    };
    let layer = fmt::layer()
        .without_time()
        .with_target(true)
        .with_writer(ConsoleMakeWriter);
    if tracing_subscriber::registry().with(filter).with(layer).try_init().is_err() {
        return;
    }
    if unknown {
        tracing::warn!(%level, "unknown log level, using info");
    }
}

/// Hands out one [`ConsoleWriter`] per event, tagged with its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted line and emits it on drop.
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let line = JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}
