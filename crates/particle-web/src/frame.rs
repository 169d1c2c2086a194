use crate::events::SharedHost;
use particle_core::FrameClock;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drive `host` from `requestAnimationFrame` until its loop control is stopped.
pub fn start_loop(host: SharedHost, on_error: Rc<dyn Fn(&particle_core::ParticleError)>) {
    let control = host.borrow().loop_control();
    let mut clock = FrameClock::default();
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !control.is_running() {
            log::info!("[frame] loop stopped");
            return;
        }
        let dt = clock.tick();
        let result = host.borrow_mut().render_frame(dt);
        if let Err(e) = result {
            on_error(&e);
            control.stop();
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));

    request_frame(&tick);
}

fn request_frame(tick: &Tick) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
