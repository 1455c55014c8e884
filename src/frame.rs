use fx_core::{Animation, FrameDriver};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Owner of a running requestAnimationFrame loop. Dropping it cancels the
/// pending frame, releases the closure and stops the driver, which drops the
/// scene and its GPU objects.
pub struct LoopHandle {
    name: &'static str,
    pending: Rc<Cell<Option<i32>>>,
    tick: TickSlot,
    stop_driver: Option<Box<dyn FnOnce()>>,
}

impl LoopHandle {
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(stop_driver) = self.stop_driver.take() else {
            return;
        };
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure -> slot cycle
        self.tick.borrow_mut().take();
        stop_driver();
        log::info!("[{}] loop released", self.name);
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn request_frame(tick: &TickSlot) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let cb = slot.as_ref()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

/// Start `driver` on the display refresh. The next frame is requested before
/// the current one runs.
pub fn start_loop<A: Animation + 'static>(
    name: &'static str,
    driver: Rc<RefCell<FrameDriver<A>>>,
) -> anyhow::Result<LoopHandle> {
    if !driver.borrow_mut().start() {
        anyhow::bail!("[{}] loop already started or stopped", name);
    }

    let tick: TickSlot = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let pending_tick = pending.clone();
    let driver_tick = driver.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        pending_tick.set(request_frame(&tick_clone));
        if !driver_tick.borrow_mut().tick(timestamp_ms) {
            if let (Some(id), Some(w)) = (pending_tick.take(), web::window()) {
                _ = w.cancel_animation_frame(id);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let Some(first) = request_frame(&tick) else {
        tick.borrow_mut().take();
        driver.borrow_mut().stop();
        anyhow::bail!("[{}] could not request an animation frame", name);
    };
    pending.set(Some(first));

    let driver_stop = driver;
    Ok(LoopHandle {
        name,
        pending,
        tick,
        stop_driver: Some(Box::new(move || driver_stop.borrow_mut().stop())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_core::{LoopState, RenderError};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    struct Counter(Rc<Cell<u32>>);

    impl Animation for Counter {
        fn frame(&mut self, _timestamp_ms: f64) -> Result<(), RenderError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    async fn next_frame() {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            web::window()
                .unwrap()
                .request_animation_frame(&resolve)
                .unwrap();
        });
        wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
    }

    fn counting_driver() -> (Rc<Cell<u32>>, Rc<RefCell<FrameDriver<Counter>>>) {
        let count = Rc::new(Cell::new(0));
        let driver = FrameDriver::new("test", Counter(count.clone()));
        (count, Rc::new(RefCell::new(driver)))
    }

    #[wasm_bindgen_test]
    async fn stop_cancels_the_pending_frame_and_stops_the_driver() {
        let (count, driver) = counting_driver();
        let handle = start_loop("test", driver.clone()).unwrap();
        for _ in 0..3 {
            next_frame().await;
        }
        assert!(count.get() > 0);

        handle.stop();
        let seen = count.get();
        next_frame().await;
        next_frame().await;
        assert_eq!(count.get(), seen);
        assert_eq!(driver.borrow().state(), LoopState::Stopped);
        assert!(driver.borrow().animation().is_none());
        // the tick closure and the stop hook held the only other references
        assert_eq!(Rc::strong_count(&driver), 1);
    }

    #[wasm_bindgen_test]
    async fn dropping_the_handle_stops_the_loop() {
        let (count, driver) = counting_driver();
        let handle = start_loop("test", driver.clone()).unwrap();
        next_frame().await;
        next_frame().await;

        drop(handle);
        let seen = count.get();
        next_frame().await;
        next_frame().await;
        assert_eq!(count.get(), seen);
        assert_eq!(driver.borrow().state(), LoopState::Stopped);
    }

    #[wasm_bindgen_test]
    fn a_driver_can_only_be_started_once() {
        let (_count, driver) = counting_driver();
        let _handle = start_loop("test", driver.clone()).unwrap();
        assert!(start_loop("test", driver).is_err());
    }
}
