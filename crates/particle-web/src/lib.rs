#![cfg(target_arch = "wasm32")]
use particle_core::constants::{FONT_URL, SPRITE_URL};
use particle_core::{AssetJoin, ParticleConfig, ParticleError, ParticleField, SceneHost};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod dom;
mod events;
mod frame;
mod render;

fn report_error(e: &ParticleError) {
    log::error!("{}", e);
    if let Some(document) = dom::window_document() {
        dom::show_error(&document, &e.to_string());
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-web starting");

    spawn_local(async move {
        if let Err(errors) = init(Rc::new(report_error)).await {
            log::error!("init aborted with {} error(s)", errors);
        }
    });
    Ok(())
}

async fn init(on_error: Rc<dyn Fn(&ParticleError)>) -> Result<(), usize> {
    let fail = |e: ParticleError| {
        on_error(&e);
        1usize
    };
    let window = web::window().ok_or_else(|| fail(ParticleError::MountPointMissing("window".into())))?;
    let document = window
        .document()
        .ok_or_else(|| fail(ParticleError::MountPointMissing("document".into())))?;

    // DOM prerequisites first: nothing is fetched without a place to draw.
    let container = dom::mount_point(&document).map_err(fail)?;
    let shaders = dom::shader_sources(&document).map_err(fail)?;

    // Both requests are in flight before either is awaited.
    let font_req = assets::request_font(&window, FONT_URL);
    let sprite_req = assets::request_sprite(&document, SPRITE_URL);

    let mut join = AssetJoin::new();
    match sprite_req {
        Ok(req) => join.resolve_sprite(req.await),
        Err(e) => join.resolve_sprite(Err(e)),
    }
    join.resolve_font(font_req.await);
    let loaded = join.finish().map_err(|errors| {
        for e in &errors {
            on_error(e);
        }
        errors.len()
    })?;

    let field = ParticleField::from_font(&loaded.font, ParticleConfig::default()).map_err(fail)?;
    let viewport = dom::container_viewport(&container);
    let canvas = dom::append_canvas(&document, &container)
        .map_err(|e| fail(ParticleError::Render(e.to_string())))?;
    let gpu = render::GpuState::new(
        canvas,
        &viewport,
        &shaders,
        &loaded.sprite,
        field.buffer().len(),
    )
    .await
    .map_err(|e| fail(ParticleError::Render(e.to_string())))?;

    let host = Rc::new(RefCell::new(SceneHost::initialize(viewport, field, gpu)));
    events::wire_resize(host.clone(), container);
    events::wire_pointer_handlers(host.clone(), &document);
    frame::start_loop(host, on_error.clone());
    Ok(())
}
