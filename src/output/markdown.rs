use colored::Colorize;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::citations::hyperlink;

/// Render markdown to ANSI-styled terminal text.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = AnsiWriter::default();
    for event in Parser::new_ext(source, options) {
        writer.handle(event);
    }
    writer.finish()
}

#[derive(Default)]
struct AnsiWriter {
    out: String,
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
    heading: Option<HeadingLevel>,
    code_block: bool,
    /// One entry per open list: the next number, or `None` for bullets.
    lists: Vec<Option<u64>>,
    /// Start offset of the open link's text, and its destination.
    link: Option<(usize, String)>,
    table: Option<RowState>,
}

/// Progress through the current table row.
#[derive(Default)]
struct RowState {
    cells: usize,
    /// Visible width so far, used to size the rule under the header.
    width: usize,
}

const CELL_SEPARATOR: &str = " │ ";

impl AnsiWriter {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.track_width(&code);
                self.out.push_str(&code.yellow().to_string());
            }
            Event::SoftBreak | Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_gap();
                self.out.push_str(&"─".repeat(40).dimmed().to_string());
                self.out.push_str("\n\n");
            }
            Event::TaskListMarker(done) => self.out.push_str(if done { "[x] " } else { "[ ] " }),
            Event::Html(raw) | Event::InlineHtml(raw) => self.out.push_str(&raw),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.block_gap();
                self.heading = Some(level);
            }
            Tag::CodeBlock(kind) => {
                self.block_gap();
                self.code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.out.push_str(&format!("  {}\n", lang.dimmed()));
                    }
                }
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}.");
                        *next += 1;
                        marker
                    }
                    _ => "•".to_string(),
                };
                self.out
                    .push_str(&format!("{}{} ", "  ".repeat(depth), marker.cyan()));
            }
            Tag::Emphasis => self.emphasis += 1,
            Tag::Strong => self.strong += 1,
            Tag::Strikethrough => self.strikethrough += 1,
            Tag::Link { dest_url, .. } => {
                self.link = Some((self.out.len(), dest_url.to_string()));
            }
            Tag::Table(_) => {
                self.block_gap();
                self.table = Some(RowState::default());
            }
            Tag::TableHead | Tag::TableRow => self.table = Some(RowState::default()),
            Tag::TableCell => {
                if let Some(row) = self.table.as_mut() {
                    if row.cells > 0 {
                        row.width += CELL_SEPARATOR.chars().count();
                        self.out.push_str(&CELL_SEPARATOR.dimmed().to_string());
                    }
                    row.cells += 1;
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.out.push_str("\n\n");
                } else {
                    self.newline();
                }
            }
            TagEnd::Heading(_) => {
                self.heading = None;
                self.out.push_str("\n\n");
            }
            TagEnd::CodeBlock => {
                self.code_block = false;
                self.out.push('\n');
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.newline();
                    self.out.push('\n');
                }
            }
            TagEnd::Item => self.newline(),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            TagEnd::TableHead => {
                let width = self.table.as_ref().map_or(0, |row| row.width);
                self.newline();
                self.out.push_str(&"─".repeat(width).dimmed().to_string());
                self.out.push('\n');
            }
            TagEnd::TableRow => self.newline(),
            TagEnd::Table => {
                self.table = None;
                self.newline();
                self.out.push('\n');
            }
            TagEnd::Link => {
                if let Some((start, url)) = self.link.take() {
                    let label = self.out.split_off(start);
                    self.out.push_str(&hyperlink(&url, &label.underline().to_string()));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code_block {
            for line in text.lines() {
                self.out.push_str(&format!("    {}\n", line.yellow()));
            }
            return;
        }

        self.track_width(text);
        let mut styled = text.normal();
        if let Some(level) = self.heading {
            styled = styled.bold();
            if level == HeadingLevel::H1 {
                styled = styled.underline();
            }
        }
        if self.strong > 0 {
            styled = styled.bold();
        }
        if self.emphasis > 0 {
            styled = styled.italic();
        }
        if self.strikethrough > 0 {
            styled = styled.strikethrough();
        }
        self.out.push_str(&styled.to_string());
    }

    fn track_width(&mut self, text: &str) {
        if let Some(row) = self.table.as_mut() {
            row.width += text.chars().count();
        }
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Leave one blank line before a new block.
    fn block_gap(&mut self) {
        self.newline();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}
