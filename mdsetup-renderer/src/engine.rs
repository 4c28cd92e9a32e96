//! Template engine seam and its Tera implementation.

use tera::Tera;

use mdsetup_core::RenderRequest;

use crate::error::RenderError;

/// Turns one template source plus a [`RenderRequest`] into text.
///
/// `name` identifies the template in error messages; the engine must not
/// assume anything about the file system.
pub trait TemplateEngine {
    fn render(
        &self,
        name: &str,
        source: &str,
        request: &RenderRequest,
    ) -> Result<String, RenderError>;
}

/// [`TemplateEngine`] backed by Tera.
///
/// Every template is compiled into its own `Tera` instance, so a syntax error
/// in one template never affects its siblings. The request is exposed to the
/// template as `data`. Autoescaping is off: outputs are plain-text decks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraEngine;

impl TeraEngine {
    fn compile(name: &str, source: &str) -> Result<Tera, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        // The writer terminates every output with exactly one newline.
        let source = source.strip_suffix('\n').unwrap_or(source);
        tera.add_raw_template(name, source)
            .map_err(|e| render_err(name, e))?;
        Ok(tera)
    }
}

impl TemplateEngine for TeraEngine {
    fn render(
        &self,
        name: &str,
        source: &str,
        request: &RenderRequest,
    ) -> Result<String, RenderError> {
        let tera = Self::compile(name, source)?;
        let mut ctx = tera::Context::new();
        ctx.insert("data", request);
        tera.render(name, &ctx).map_err(|e| render_err(name, e))
    }
}

fn render_err(name: &str, source: tera::Error) -> RenderError {
    RenderError::TemplateRender {
        template: name.to_string(),
        source,
    }
}
