use crate::dom;
use crate::render::GpuState;
use glam::Vec2;
use particle_core::SceneHost;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedHost = Rc<RefCell<SceneHost<GpuState>>>;

pub fn wire_resize(host: SharedHost, container: web::HtmlElement) {
    let closure = Closure::wrap(Box::new(move || {
        let viewport = dom::container_viewport(&container);
        host.borrow_mut().on_resize(viewport);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_pointer_handlers(host: SharedHost, document: &web::Document) {
    wire_mouse(document, "mousedown", host.clone(), |host, ev| {
        host.borrow_mut()
            .field_mut()
            .on_pointer_down(client_pos(ev), window_vec());
    });
    wire_mouse(document, "mousemove", host.clone(), |host, ev| {
        host.borrow_mut()
            .field_mut()
            .on_pointer_move(client_pos(ev), window_vec());
    });
    wire_mouse(document, "mouseup", host, |host, _ev| {
        host.borrow_mut().field_mut().on_pointer_up();
    });
}

fn wire_mouse(
    document: &web::Document,
    event: &str,
    host: SharedHost,
    handler: fn(&SharedHost, &web::MouseEvent),
) {
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        handler(&host, &ev);
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
fn window_vec() -> Vec2 {
    let (w, h) = dom::window_size();
    Vec2::new(w, h)
}
