//! Browser-side asset fetching.
//!
//! Requests are started eagerly by the `request_*` functions so both loads
//! run at the same time; the returned futures only wait for them.

use particle_core::{AssetKind, Font, ParticleError, SpriteImage};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(kind: AssetKind, e: JsValue) -> ParticleError {
    ParticleError::asset(kind, format!("{:?}", e))
}

/// Starts the font fetch and returns a future resolving to the parsed font.
pub fn request_font(
    window: &web::Window,
    url: &str,
) -> impl std::future::Future<Output = Result<Font, ParticleError>> {
    let fetch = JsFuture::from(window.fetch_with_str(url));
    let url = url.to_string();
    async move {
        let resp: web::Response = fetch
            .await
            .map_err(|e| js_err(AssetKind::Font, e))?
            .dyn_into()
            .map_err(|e| js_err(AssetKind::Font, e))?;
        if !resp.ok() {
            return Err(ParticleError::asset(
                AssetKind::Font,
                format!("HTTP {} for {}", resp.status(), url),
            ));
        }
        let text = JsFuture::from(resp.text().map_err(|e| js_err(AssetKind::Font, e))?)
            .await
            .map_err(|e| js_err(AssetKind::Font, e))?
            .as_string()
            .ok_or_else(|| ParticleError::asset(AssetKind::Font, "response body is not text"))?;
        Font::from_json(&text)
    }
}

/// Starts the sprite image download and returns a future resolving to its RGBA pixels.
pub fn request_sprite(
    document: &web::Document,
    url: &str,
) -> Result<impl std::future::Future<Output = Result<SpriteImage, ParticleError>>, ParticleError> {
    let img = web::HtmlImageElement::new().map_err(|e| js_err(AssetKind::Sprite, e))?;
    img.set_cross_origin(Some("anonymous"));

    let img_for_promise = img.clone();
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once_into_js(move |e: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &e);
        });
        img_for_promise.set_onload(Some(onload.unchecked_ref()));
        img_for_promise.set_onerror(Some(onerror.unchecked_ref()));
    });
    img.set_src(url);

    let document = document.clone();
    let url = url.to_string();
    Ok(async move {
        JsFuture::from(loaded).await.map_err(|_| {
            ParticleError::asset(AssetKind::Sprite, format!("could not load {}", url))
        })?;
        decode_rgba(&document, &img)
    })
}

fn decode_rgba(
    document: &web::Document,
    img: &web::HtmlImageElement,
) -> Result<SpriteImage, ParticleError> {
    let (w, h) = (img.natural_width(), img.natural_height());
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| js_err(AssetKind::Sprite, e))?
        .dyn_into()
        .map_err(|e| js_err(AssetKind::Sprite, e.into()))?;
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| js_err(AssetKind::Sprite, e))?
        .ok_or_else(|| ParticleError::asset(AssetKind::Sprite, "no 2d context"))?
        .dyn_into()
        .map_err(|e| js_err(AssetKind::Sprite, e.into()))?;
    ctx.draw_image_with_html_image_element(img, 0.0, 0.0)
        .map_err(|e| js_err(AssetKind::Sprite, e))?;
    let data = ctx
        .get_image_data(0.0, 0.0, w as f64, h as f64)
        .map_err(|e| js_err(AssetKind::Sprite, e))?;
    SpriteImage::new(w, h, data.data().0)
}
