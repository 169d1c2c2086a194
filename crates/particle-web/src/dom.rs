use particle_core::constants::{FRAGMENT_SHADER_ID, MOUNT_ID, VERTEX_SHADER_ID};
use particle_core::{ParticleError, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

/// WGSL text read from the page's shader script tags.
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn mount_point(document: &web::Document) -> Result<web::HtmlElement, ParticleError> {
    document
        .get_element_by_id(MOUNT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .ok_or_else(|| ParticleError::MountPointMissing(MOUNT_ID.to_string()))
}

fn script_text(document: &web::Document, id: &str) -> Result<String, ParticleError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ParticleError::ShaderSourceMissing(id.to_string()))
}

pub fn shader_sources(document: &web::Document) -> Result<ShaderSources, ParticleError> {
    Ok(ShaderSources {
        vertex: script_text(document, VERTEX_SHADER_ID)?,
        fragment: script_text(document, FRAGMENT_SHADER_ID)?,
    })
}

/// Current container size with the capped device pixel ratio.
pub fn container_viewport(container: &web::HtmlElement) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    Viewport::new(
        container.client_width().max(1) as f64,
        container.client_height().max(1) as f64,
        dpr,
    )
}

/// Window inner size, the frame pointer coordinates are normalized against.
pub fn window_size() -> (f32, f32) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    (width as f32, height as f32)
}

pub fn append_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Put a short diagnostic into the mount container, or the body without one.
pub fn show_error(document: &web::Document, message: &str) {
    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_class_name("particle-error");
    let _ = el.set_attribute(
        "style",
        "color: #cfe7ff; font: 13px system-ui; padding: 8px 12px; opacity: 0.8;",
    );
    el.set_text_content(Some(message));
    let parent: Option<web::Node> = match document.get_element_by_id(MOUNT_ID) {
        Some(m) => Some(m.into()),
        None => document.body().map(Into::into),
    };
    if let Some(p) = parent {
        let _ = p.append_child(&el);
    }
}
