//! JSON writers shared by the CLI and tests

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

/// One pretty-printed array followed by a newline.
pub fn write_json_pretty<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, items).context("encoding JSON")?;
    writeln!(w)?;
    Ok(())
}

/// One compact object per line.
pub fn write_ndjson<T: Serialize>(items: &[T], mut w: impl Write) -> Result<()> {
    for item in items {
        serde_json::to_writer(&mut w, item).context("encoding NDJSON record")?;
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::font::Font;

    #[test]
    fn ndjson_writes_one_line_per_font() {
        let catalog = Catalog::builtin();
        let fonts: Vec<&Font> = catalog.fonts().iter().take(2).collect();
        let mut buf = Vec::new();

        write_ndjson(&fonts, &mut buf).expect("write ndjson");

        let text = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Font = serde_json::from_str(lines[0]).expect("parse");
        assert_eq!(parsed.id, fonts[0].id);
    }

    #[test]
    fn pretty_json_is_one_array() {
        let mut buf = Vec::new();
        write_json_pretty::<Font>(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }
}
