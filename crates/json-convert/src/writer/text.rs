use super::JsonWrite;

/// Layout of the text produced by [`TextWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No whitespace at all.
    #[default]
    Compact,
    /// One member or element per line, indented by `indent` spaces per level.
    Pretty { indent: usize },
}

impl Style {
    pub const fn pretty() -> Self {
        Style::Pretty { indent: 2 }
    }
}

/// Writes JSON text into an in-memory string.
///
/// # Example
///
/// ```
/// use json_convert::writer::{JsonWrite, TextWriter};
///
/// let mut w = TextWriter::new();
/// w.start_object();
/// w.key("ids");
/// w.start_array();
/// w.write_int(1);
/// w.write_int(2);
/// w.end_array();
/// w.end_object();
/// assert_eq!(w.as_str(), r#"{"ids":[1,2]}"#);
/// ```
#[derive(Debug, Default)]
pub struct TextWriter {
    out: String,
    style: Style,
    /// Entries written so far in each open container, innermost last.
    frames: Vec<usize>,
    after_key: bool,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::with_style(Style::Compact)
    }

    pub fn pretty() -> Self {
        Self::with_style(Style::pretty())
    }

    pub fn with_style(style: Style) -> Self {
        Self {
            out: String::new(),
            style,
            frames: Vec::new(),
            after_key: false,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Discard everything written so far, keeping the allocation.
    pub fn reset(&mut self) {
        self.out.clear();
        self.frames.clear();
        self.after_key = false;
    }

    fn newline_indent(&mut self) {
        if let Style::Pretty { indent } = self.style {
            self.out.push('\n');
            let width = indent * self.frames.len();
            self.out.extend(std::iter::repeat(' ').take(width));
        }
    }

    /// Separator and indentation for a new array element or object member.
    fn begin_entry(&mut self) {
        let Some(count) = self.frames.last_mut() else {
            return;
        };
        let first = *count == 0;
        *count += 1;
        if !first {
            self.out.push(',');
        }
        self.newline_indent();
    }

    fn before_value(&mut self) {
        if self.after_key {
            self.after_key = false;
        } else {
            self.begin_entry();
        }
    }

    fn raw(&mut self, text: &str) {
        self.before_value();
        self.out.push_str(text);
    }

    fn open(&mut self, bracket: char) {
        self.before_value();
        self.out.push(bracket);
        self.frames.push(0);
    }

    /// A key whose value never arrived is written as `null`.
    fn flush_dangling_key(&mut self) {
        if self.after_key {
            self.after_key = false;
            self.out.push_str("null");
        }
    }

    fn close(&mut self, bracket: char) {
        self.flush_dangling_key();
        let count = self.frames.pop().unwrap_or(0);
        if count > 0 {
            self.newline_indent();
        }
        self.out.push(bracket);
    }
}

impl JsonWrite for TextWriter {
    fn start_object(&mut self) {
        self.open('{');
    }

    fn end_object(&mut self) {
        self.close('}');
    }

    fn start_array(&mut self) {
        self.open('[');
    }

    fn end_array(&mut self) {
        self.close(']');
    }

    fn key(&mut self, key: &str) {
        self.flush_dangling_key();
        self.begin_entry();
        push_json_string(&mut self.out, key);
        self.out.push(':');
        if let Style::Pretty { .. } = self.style {
            self.out.push(' ');
        }
        self.after_key = true;
    }

    fn write_null(&mut self) {
        self.raw("null");
    }

    fn write_bool(&mut self, value: bool) {
        self.raw(if value { "true" } else { "false" });
    }

    fn write_int(&mut self, value: i32) {
        self.raw(&value.to_string());
    }

    fn write_uint(&mut self, value: u32) {
        self.raw(&value.to_string());
    }

    fn write_int64(&mut self, value: i64) {
        self.raw(&value.to_string());
    }

    fn write_uint64(&mut self, value: u64) {
        self.raw(&value.to_string());
    }

    fn write_double(&mut self, value: f64) {
        if value.is_finite() {
            // Debug keeps a fraction or exponent (`5.0`, `1e16`) so the text
            // parses back as a double, and is the shortest round-trip form.
            self.raw(&format!("{value:?}"));
        } else {
            self.raw("null");
        }
    }

    fn write_string(&mut self, value: &str) {
        self.before_value();
        push_json_string(&mut self.out, value);
    }
}

fn push_json_string(out: &mut String, s: &str) {
    out.push('"');
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        let escape = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0c => "\\f",
            0x00..=0x1f => "",
            _ => continue,
        };
        out.push_str(&s[start..i]);
        if escape.is_empty() {
            out.push_str(&format!("\\u{b:04x}"));
        } else {
            out.push_str(escape);
        }
        start = i + 1;
    }
    out.push_str(&s[start..]);
    out.push('"');
}
