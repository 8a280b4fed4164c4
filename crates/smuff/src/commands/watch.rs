//! Watch command handler: live stdin stream -> view updates.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use smuff_core::render::{ClassRenderer, ViewAdapter, ViewUpdate};

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;

use super::{Ctx, events};

/// Prints each view update as it is produced.
///
/// The first write failure is kept and every later update is dropped.
struct PrintAdapter<W: Write> {
    format: OutputFormat,
    out: W,
    failed: Option<io::Error>,
}

impl<W: Write> PrintAdapter<W> {
    fn new(format: OutputFormat, out: W) -> Self {
        Self {
            format,
            out,
            failed: None,
        }
    }
}

impl<W: Write> ViewAdapter for PrintAdapter<W> {
    fn apply(&mut self, update: &ViewUpdate) {
        if self.failed.is_some() {
            return;
        }
        let line = match self.format {
            OutputFormat::Table | OutputFormat::Plain => describe(update),
            // One document per update keeps the stream line-oriented.
            OutputFormat::Json | OutputFormat::JsonCompact => {
                serde_json::to_string(update).unwrap_or_default()
            }
            OutputFormat::Yaml => match serde_yaml::to_string(update) {
                Ok(doc) => format!("---\n{}", doc.trim_end()),
                Err(_) => String::new(),
            },
        };
        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            self.failed = Some(e);
        }
    }
}

/// Text of one raw stdin line, or `None` when it is not UTF-8.
fn decode_line(number: usize, raw: &[u8]) -> Option<&str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(line = number, error = %e, "skipping undecodable event line");
            None
        }
    }
}

fn describe(update: &ViewUpdate) -> String {
    match update {
        ViewUpdate::SetValue { element, value } => format!("{element} = {value}"),
        ViewUpdate::SetClass { element, class } => format!("{element} .{class}"),
        ViewUpdate::AppendLog { line } => format!("> {line}"),
    }
}

pub async fn handle(args: &WatchArgs, ctx: &Ctx) -> Result<(), CliError> {
    let mut reconciler = events::reconciler_for(args.plugin.as_deref(), ctx);

    // Snapshot subscriber: ends once the reconciler is dropped.
    let mut stream = reconciler.subscribe();
    let observer = tokio::spawn(async move {
        while let Some(snapshot) = stream.changed().await {
            debug!(
                version = snapshot.version,
                terminal = snapshot.terminal_len,
                "panel snapshot published"
            );
        }
    });

    let mut adapter = PrintAdapter::new(ctx.output, io::stdout());
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut raw = Vec::new();
    let mut number = 0;
    let mut result: Result<(), CliError> = Ok(());

    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        number += 1;
        let Some(line) = decode_line(number, &raw) else {
            continue;
        };
        let Some(inbound) = events::parse_line(number, line) else {
            continue;
        };
        let outcome = inbound.apply_to(&mut reconciler);
        if !ctx.quiet {
            ClassRenderer::render(&outcome, &mut adapter);
        }
        if let Some(err) = adapter.failed.take() {
            // A closed pipe means the reader is done, not that we failed.
            if err.kind() == io::ErrorKind::BrokenPipe {
                debug!(line = number, "stdout closed, stopping watch");
            } else {
                result = Err(err.into());
            }
            break;
        }
    }

    drop(reconciler);
    let _ = observer.await;
    result
}
