//! The single forward pass that turns a token stream into drawing calls.

use crate::cell::CellController;
use crate::status::Status;
use crate::style::{FontSizeState, StyleState};
use crate::template::TemplateDescriptor;
use pdfmaker_markup::{Tag, Token, tokenize};
use pdfmaker_render_core::{PageSurface, RenderError};
use std::collections::BTreeSet;
use std::io::Write;

/// Mutable state owned by one render pass.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub style: StyleState,
    pub font_size: FontSizeState,
    pub cell: CellController,
}

impl RenderState {
    pub fn new(default_font_size: f32, small_font_size: f32) -> Self {
        Self {
            style: StyleState::new(),
            font_size: FontSizeState::new(default_font_size, small_font_size),
            cell: CellController::new(),
        }
    }
}

/// Drives a [`PageSurface`] through one document.
///
/// Draw failures are recorded in the returned [`Status`] and never stop the
/// pass. Every page, including the last one, gets its template overlay at
/// most once, and the surface is finalized exactly once.
pub struct PageRenderer<'s, S: PageSurface + ?Sized> {
    surface: &'s mut S,
    template: TemplateDescriptor,
    state: RenderState,
    line_height: f32,
    stamped: BTreeSet<usize>,
    status: Status,
}

impl<'s, S: PageSurface + ?Sized> PageRenderer<'s, S> {
    pub fn new(
        surface: &'s mut S,
        template: TemplateDescriptor,
        state: RenderState,
        line_height: f32,
    ) -> Self {
        Self {
            surface,
            template,
            state,
            line_height,
            stamped: BTreeSet::new(),
            status: Status::new(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Tokenizes `text`, draws it and finalizes the surface into `destination`.
    pub fn render(mut self, text: &str, destination: &mut dyn Write) -> Status {
        self.begin();
        self.run(tokenize(text));
        self.finish(destination)
    }

    /// Applies the initial style and font size to the surface.
    pub fn begin(&mut self) {
        let variant = self.state.style.variant();
        let result = self.surface.set_style_variant(&variant);
        self.record("select font style", result);
        let size = self.state.font_size.current();
        let result = self.surface.set_font_size(size);
        self.record("select font size", result);
    }

    pub fn run<I: IntoIterator<Item = Token>>(&mut self, tokens: I) {
        for token in tokens {
            self.process(token);
        }
    }

    pub fn process(&mut self, token: Token) {
        match token {
            Token::Content(text) => self.draw_content(&text),
            Token::Tag(tag) => self.apply_tag(&tag),
        }
        self.collect_surface_events();
    }

    /// Stamps the final page, finalizes the surface and returns everything recorded.
    pub fn finish(mut self, destination: &mut dyn Write) -> Status {
        self.collect_surface_events();
        let last_page = self.surface.page_number();
        self.overlay(last_page);

        let result = self.surface.finalize(destination);
        self.record("write document", result);
        self.status.extend(self.surface.take_warnings());

        if self.status.is_ok() {
            log::debug!("Rendered {} page(s)", last_page);
        } else {
            log::debug!("Rendered {} page(s) with {} problem(s)", last_page, self.status.len());
        }
        self.status
    }

    fn draw_content(&mut self, text: &str) {
        let content = self.state.cell.prepare_content(text);
        if content.is_empty() {
            return;
        }
        let result = match self.state.cell.active() {
            Some(attrs) => self.surface.draw_cell(content, attrs),
            None => self.surface.draw_text_run(self.line_height, content),
        };
        self.record("draw content", result);
    }

    fn apply_tag(&mut self, tag: &Tag) {
        let name = tag.name.as_str();
        let variant = if tag.is_closing {
            self.state.style.close(name)
        } else {
            self.state.style.open(name)
        };
        if let Some(variant) = variant {
            let result = self.surface.set_style_variant(&variant);
            self.record("select font style", result);
            return;
        }

        match (name, tag.is_closing) {
            ("SMALL", false) => {
                let size = self.state.font_size.open_small();
                let result = self.surface.set_font_size(size);
                self.record("select font size", result);
            }
            ("SMALL", true) => {
                let size = self.state.font_size.close_small();
                let result = self.surface.set_font_size(size);
                self.record("select font size", result);
            }
            ("CELL", false) => self.state.cell.open(&tag.attributes),
            ("CELL", true) => {
                log::debug!("Leaving cell mode");
                self.state.cell.close();
            }
            _ => {
                let slash = if tag.is_closing { "/" } else { "" };
                log::debug!("Ignoring unknown tag <{}{}>", slash, name);
            }
        }
    }

    fn collect_surface_events(&mut self) {
        for page in self.surface.take_page_breaks() {
            self.overlay(page);
        }
        self.status.extend(self.surface.take_warnings());
    }

    fn overlay(&mut self, page: usize) {
        if !self.stamped.insert(page) {
            return;
        }
        let Some(template_page) = self.template.select_overlay(page) else {
            return;
        };
        let result = self.surface.stamp_template_page(page, template_page);
        self.record("stamp template", result);
    }

    fn record(&mut self, action: &str, result: Result<(), RenderError>) {
        if let Err(e) = result {
            let page = self.surface.page_number();
            let message = format!("Failed to {} on page {}: {}", action, page, e);
            log::warn!("{}", message);
            self.status.append(message);
        }
    }
}
